use crate::adapter::defaults::Defaults;
use crate::parser::terraform::{Block, Modules};
use crate::parser::AttributeExt;
use crate::providers::azure::compute::{Compute, LinuxVirtualMachine, OsProfileLinuxConfig};

pub(super) fn adapt(modules: &Modules) -> Compute {
    Compute {
        linux_virtual_machines: modules
            .get_resources_by_type(&["azurerm_linux_virtual_machine", "azurerm_virtual_machine"])
            .into_iter()
            .filter_map(adapt_linux_vm)
            .collect(),
    }
}

/// Linux VMs only: the legacy `azurerm_virtual_machine` counts when it
/// carries an `os_profile_linux_config` block.
fn adapt_linux_vm(block: &Block) -> Option<LinuxVirtualMachine> {
    let os_profile_linux_config = if block.is_resource_type("azurerm_linux_virtual_machine") {
        OsProfileLinuxConfig {
            metadata: block.metadata(),
            disable_password_authentication: Defaults::for_resource("azurerm_linux_virtual_machine")
                .bool_attr(block, "disable_password_authentication"),
        }
    } else {
        let config = block.get_block("os_profile_linux_config")?;
        let defaults = Defaults::for_resource("azurerm_virtual_machine").within("os_profile_linux_config");
        OsProfileLinuxConfig {
            metadata: config.metadata(),
            disable_password_authentication: defaults
                .bool_attr(config, "disable_password_authentication"),
        }
    };

    let custom_data = match block.get_block("os_profile") {
        Some(profile) if block.get_attribute("custom_data").is_none() => profile
            .get_attribute("custom_data")
            .as_string_value_or_default("", profile),
        _ => block
            .get_attribute("custom_data")
            .as_string_value_or_default("", block),
    };

    Some(LinuxVirtualMachine {
        metadata: block.metadata(),
        custom_data,
        os_profile_linux_config,
    })
}
