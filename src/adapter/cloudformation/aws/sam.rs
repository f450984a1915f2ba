use crate::parser::cloudformation::{FileContext, Resource};
use crate::parser::{AttributeExt, ConfigBlock};
use crate::providers::aws::sam::{AccessLogging, HttpApi, RouteSettings, Sam};
use crate::types::{BoolValue, StringValue};

const HTTP_API: &str = "AWS::Serverless::HttpApi";

pub(super) fn adapt(file: &FileContext) -> Sam {
    Sam {
        http_apis: file
            .get_resources_by_type(HTTP_API)
            .into_iter()
            .map(adapt_http_api)
            .collect(),
    }
}

fn adapt_http_api(resource: &Resource) -> HttpApi {
    let access_logging = match resource.get_property("AccessLogSettings") {
        Some(settings) => AccessLogging {
            metadata: settings.metadata(),
            cloudwatch_log_group_arn: settings
                .get_attribute("DestinationArn")
                .as_string_value_or_default("", settings),
        },
        None => AccessLogging {
            metadata: resource.metadata(),
            cloudwatch_log_group_arn: StringValue::defaulted(String::new(), resource.metadata()),
        },
    };

    let default_route_settings = match resource.get_property("DefaultRouteSettings") {
        Some(route) => {
            let level = route
                .get_attribute("LoggingLevel")
                .as_string_value_or_default("OFF", route);
            RouteSettings {
                metadata: route.metadata(),
                logging_enabled: level.map(|l| !l.eq_ignore_ascii_case("OFF")),
                data_trace_enabled: route
                    .get_attribute("DataTraceEnabled")
                    .as_bool_value_or_default(false, route),
                detailed_metrics_enabled: route
                    .get_attribute("DetailedMetricsEnabled")
                    .as_bool_value_or_default(false, route),
            }
        }
        None => RouteSettings {
            metadata: resource.metadata(),
            logging_enabled: BoolValue::defaulted(false, resource.metadata()),
            data_trace_enabled: BoolValue::defaulted(false, resource.metadata()),
            detailed_metrics_enabled: BoolValue::defaulted(false, resource.metadata()),
        },
    };

    HttpApi {
        metadata: resource.metadata(),
        name: resource.get_attribute("Name").as_string_value_or_default("", resource),
        access_logging,
        default_route_settings,
    }
}
