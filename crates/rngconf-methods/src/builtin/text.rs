use rngconf_core::SqlType;

use crate::method::{MethodId, MethodSpec};
use crate::params::ParamSpec;
use crate::registry::MethodRegistry;

const TEXT_TYPES: &[SqlType] = &[SqlType::Varchar, SqlType::Char];
const MAX_WORDS: f64 = 1000.0;

pub fn register(registry: &mut MethodRegistry) {
    registry.register_for(
        TEXT_TYPES,
        MethodSpec::new(MethodId::Words, "between min_words and max_words lorem words")
            .with_param(ParamSpec::int("min_words", 1).within(0.0, MAX_WORDS))
            .with_param(ParamSpec::int("max_words", 3).within(0.0, MAX_WORDS)),
    );
    registry.register_for(
        TEXT_TYPES,
        MethodSpec::new(MethodId::Constant, "always the same value")
            .with_param(ParamSpec::string("value", "")),
    );
    registry.register_for(
        TEXT_TYPES,
        MethodSpec::new(MethodId::Pattern, "strings matching a regular expression")
            .with_param(ParamSpec::pattern("pattern", "[a-z]{8}")),
    );
    registry.register_for(TEXT_TYPES, MethodSpec::new(MethodId::Email, "email addresses"));
    registry.register_for(TEXT_TYPES, MethodSpec::new(MethodId::Name, "person names"));
}
