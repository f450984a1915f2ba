use crate::adapter::defaults::Defaults;
use crate::parser::terraform::{Block, Modules};
use crate::parser::AttributeExt;
use crate::providers::azure::appservice::{
    AppService, Authentication, FunctionApp, Identity, Site, Service,
};
use crate::types::{BoolValue, StringValue};

const SERVICE_TYPES: &[&str] = &[
    "azurerm_app_service",
    "azurerm_linux_web_app",
    "azurerm_windows_web_app",
];

const FUNCTION_APP_TYPES: &[&str] = &[
    "azurerm_function_app",
    "azurerm_linux_function_app",
    "azurerm_windows_function_app",
];

pub(super) fn adapt(modules: &Modules) -> AppService {
    AppService {
        services: modules
            .get_resources_by_type(SERVICE_TYPES)
            .into_iter()
            .map(adapt_service)
            .collect(),
        function_apps: modules
            .get_resources_by_type(FUNCTION_APP_TYPES)
            .into_iter()
            .map(adapt_function_app)
            .collect(),
    }
}

fn adapt_service(block: &Block) -> Service {
    let identity = match block.get_block("identity") {
        Some(b) => Identity {
            metadata: b.metadata(),
            kind: b.get_attribute("type").as_string_value_or_default("", b),
        },
        None => Identity {
            metadata: block.metadata(),
            kind: StringValue::defaulted(String::new(), block.metadata()),
        },
    };

    let auth = block
        .get_block("auth_settings")
        .or_else(|| block.get_block("auth_settings_v2"));
    let authentication = match auth {
        Some(b) => Authentication {
            metadata: b.metadata(),
            enabled: b
                .get_attribute("enabled")
                .or_else(|| b.get_attribute("auth_enabled"))
                .as_bool_value_or_default(false, b),
        },
        None => Authentication {
            metadata: block.metadata(),
            enabled: BoolValue::defaulted(false, block.metadata()),
        },
    };

    let site_defaults = Defaults::for_resource("azurerm_app_service").within("site_config");
    let default_tls = site_defaults.string("min_tls_version");
    let site = match block.get_block("site_config") {
        Some(b) => Site {
            metadata: b.metadata(),
            enable_http2: b.get_attribute("http2_enabled").as_bool_value_or_default(false, b),
            // Newer web app resources renamed the attribute.
            minimum_tls_version: b
                .get_attribute("min_tls_version")
                .or_else(|| b.get_attribute("minimum_tls_version"))
                .as_string_value_or_default(default_tls, b),
        },
        None => Site {
            metadata: block.metadata(),
            enable_http2: BoolValue::defaulted(false, block.metadata()),
            minimum_tls_version: StringValue::defaulted(default_tls.to_string(), block.metadata()),
        },
    };

    Service {
        metadata: block.metadata(),
        enable_client_cert: block
            .get_attribute("client_cert_enabled")
            .as_bool_value_or_default(false, block),
        identity,
        authentication,
        site,
    }
}

fn adapt_function_app(block: &Block) -> FunctionApp {
    FunctionApp {
        metadata: block.metadata(),
        https_only: block
            .get_attribute("https_only")
            .as_bool_value_or_default(false, block),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::modules;

    #[test]
    fn configured_service() {
        let m = modules(vec![Block::resource("azurerm_app_service", "my_example")
            .lines(2, 16)
            .with_attribute("name", "example-app-service", 3)
            .with_attribute("client_cert_enabled", true, 4)
            .with_block(
                Block::nested("identity")
                    .lines(5, 8)
                    .with_attribute("type", "UserAssigned", 6),
            )
            .with_block(
                Block::nested("site_config")
                    .lines(9, 12)
                    .with_attribute("http2_enabled", true, 10)
                    .with_attribute("min_tls_version", "1.0", 11),
            )
            .with_block(
                Block::nested("auth_settings")
                    .lines(13, 15)
                    .with_attribute("enabled", true, 14),
            )]);
        let s = &adapt(&m).services[0];
        assert!(s.enable_client_cert.is_true());
        assert_eq!(s.identity.kind.as_str(), "UserAssigned");
        assert!(s.authentication.enabled.is_true());
        assert!(s.site.enable_http2.is_true());
        assert_eq!(s.site.minimum_tls_version.as_str(), "1.0");
        assert_eq!(s.site.minimum_tls_version.metadata().range().start_line(), 11);
    }

    #[test]
    fn defaults_and_aliases() {
        let m = modules(vec![
            Block::resource("azurerm_linux_web_app", "web"),
            Block::resource("azurerm_windows_function_app", "f").with_attribute("https_only", true, 3),
            Block::resource("azurerm_function_app", "g"),
        ]);
        let adapted = adapt(&m);
        assert_eq!(adapted.services.len(), 1);
        let s = &adapted.services[0];
        assert_eq!(s.site.minimum_tls_version.as_str(), "1.2");
        assert!(s.site.minimum_tls_version.is_default());
        assert!(s.enable_client_cert.is_false());

        assert_eq!(adapted.function_apps.len(), 2);
        assert!(adapted.function_apps[0].https_only.is_true());
        assert!(adapted.function_apps[1].https_only.is_false());
    }
}
