use crate::adapter::defaults::Defaults;
use crate::adapter::string_flag;
use crate::parser::terraform::Modules;
use crate::providers::azure::datalake::{DataLake, Store};

const STORE: &str = "azurerm_data_lake_store";

pub(super) fn adapt(modules: &Modules) -> DataLake {
    DataLake {
        stores: modules
            .get_resources_by_type(&[STORE])
            .into_iter()
            .map(|block| Store {
                metadata: block.metadata(),
                enable_encryption: string_flag(
                    Defaults::for_resource(STORE).string_attr(block, "encryption_state"),
                    "Enabled",
                ),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::terraform::Block;
    use crate::test_util::modules;

    #[test]
    fn encryption_state() {
        let m = modules(vec![
            Block::resource(STORE, "off").with_attribute("encryption_state", "Disabled", 2),
            Block::resource(STORE, "default").lines(4, 5),
        ]);
        let stores = adapt(&m).stores;
        assert!(stores[0].enable_encryption.is_false());
        assert!(stores[0].enable_encryption.is_explicit());
        assert!(stores[1].enable_encryption.is_true());
        assert!(stores[1].enable_encryption.is_default());
    }
}
