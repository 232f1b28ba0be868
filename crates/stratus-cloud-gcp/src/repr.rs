//! Compute API objects → resource templates

use crate::compute::{ApiNetwork, ApiSubnetwork};
use stratus_cloud::naming::short_name;
use stratus_cloud::{NetworkTemplate, SubnetTemplate};

/// Map a network. Subnets become name-only placeholders taken from the last
/// segment of each subnetwork URL; describing them costs one call each, so
/// listing never does it.
pub fn network_template(net: &ApiNetwork) -> NetworkTemplate {
    let subnets = net
        .subnetworks
        .iter()
        .map(|url| SubnetTemplate::placeholder(short_name(url)))
        .collect();

    NetworkTemplate {
        id: net.id.clone(),
        name: Some(net.name.clone()),
        description: net.description.clone(),
        cidr: net.ipv4_range.clone(),
        created: net.creation_timestamp.clone(),
        subnets: Some(subnets),
    }
}

// TODO: resolve the owning network name from `subnet.network` once templates carry it.
pub fn subnet_template(subnet: &ApiSubnetwork) -> SubnetTemplate {
    SubnetTemplate {
        id: subnet.id.clone(),
        name: Some(subnet.name.clone()),
        description: subnet.description.clone(),
        cidr: subnet.ip_cidr_range.clone(),
        gateway: subnet.gateway_address.clone(),
        created: subnet.creation_timestamp.clone(),
    }
}
