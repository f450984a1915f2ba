use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, BytesValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compute {
    pub disks: Vec<Disk>,
    pub instances: Vec<Instance>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Disk {
    pub metadata: Metadata,
    pub name: StringValue,
    pub encryption: DiskEncryption,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskEncryption {
    pub metadata: Metadata,
    pub raw_key: BytesValue,
    pub kms_key_link: StringValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub metadata: Metadata,
    pub name: StringValue,
    pub os_login_enabled: BoolValue,
    pub can_ip_forward: BoolValue,
    pub boot_disks: Vec<Disk>,
}
