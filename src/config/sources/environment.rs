//! Environment source: PROPHASH_<SECTION>__<KEY>, e.g. PROPHASH_LOGGING__LEVEL=debug

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Add environment overrides to builder.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("PROPHASH")
            .prefix_separator("_")
            .separator("__"),
    )
}
