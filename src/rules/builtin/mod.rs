//! The builtin rule catalog, grouped by provider and service.

mod aws;
mod azure;
mod digitalocean;
mod google;
mod kubernetes;

use super::{Rule, RuleMetadata, Severity};

/// Every builtin rule, in catalog order.
pub fn all_rules() -> Vec<Rule> {
    let mut rules = aws::rules();
    rules.extend(azure::rules());
    rules.extend(digitalocean::rules());
    rules.extend(google::rules());
    rules.extend(kubernetes::rules());
    rules
}

/// Identity of a builtin rule: `(id, provider, service, short_code)`.
type Identity<'a> = (&'a str, &'a str, &'a str, &'a str);

fn metadata(
    (id, provider, service, short_code): Identity<'_>,
    severity: Severity,
    summary: &str,
    impact: &str,
    resolution: &str,
) -> RuleMetadata {
    RuleMetadata {
        id: id.into(),
        provider: provider.into(),
        service: service.into(),
        short_code: short_code.into(),
        summary: summary.into(),
        impact: impact.into(),
        resolution: resolution.into(),
        severity,
    }
}
