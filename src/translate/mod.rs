pub mod cloud;
pub mod factory;
pub mod interface;
pub mod public;

pub use cloud::CloudTranslator;
pub use factory::TranslatorFactory;
pub use interface::Translator;
pub use public::PublicTranslator;
