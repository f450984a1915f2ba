use crate::rules::builtin::metadata;
use crate::rules::{Results, Rule, Severity};
use crate::state::State;

pub(super) fn rules() -> Vec<Rule> {
    vec![disable_password_authentication()]
}

fn disable_password_authentication() -> Rule {
    Rule::new(
        metadata(
            ("CS-AZU-002", "azure", "compute", "disable-password-authentication"),
            Severity::High,
            "Password authentication should be disabled on Azure virtual machines",
            "Using password authentication is less secure that ssh keys may result in compromised servers",
            "Use ssh authentication for virtual machines",
        ),
        |state: &State| {
            let mut results = Results::default();
            for vm in &state.azure.compute.linux_virtual_machines {
                if vm.metadata.is_unmanaged() {
                    continue;
                }
                let disabled = &vm.os_profile_linux_config.disable_password_authentication;
                if disabled.is_false() {
                    results.add(
                        "Linux virtual machine allows password authentication.",
                        disabled.metadata(),
                    );
                } else {
                    results.add_passed(&vm.metadata);
                }
            }
            results
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::azure::compute::{LinuxVirtualMachine, OsProfileLinuxConfig};
    use crate::rules::builtin::testing::failures;
    use crate::types::{BoolValue, Metadata};

    fn vm(disable: bool) -> State {
        let mut state = State::default();
        state.azure.compute.linux_virtual_machines.push(LinuxVirtualMachine {
            metadata: Metadata::test(),
            os_profile_linux_config: OsProfileLinuxConfig {
                metadata: Metadata::test(),
                disable_password_authentication: BoolValue::new(disable, Metadata::test()),
            },
            ..LinuxVirtualMachine::default()
        });
        state
    }

    #[test]
    fn password_authentication() {
        assert_eq!(failures(&disable_password_authentication(), &vm(false)).len(), 1);
        assert!(failures(&disable_password_authentication(), &vm(true)).is_empty());
    }
}
