use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compute {
    pub linux_virtual_machines: Vec<LinuxVirtualMachine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinuxVirtualMachine {
    pub metadata: Metadata,
    pub custom_data: StringValue,
    pub os_profile_linux_config: OsProfileLinuxConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OsProfileLinuxConfig {
    pub metadata: Metadata,
    pub disable_password_authentication: BoolValue,
}
