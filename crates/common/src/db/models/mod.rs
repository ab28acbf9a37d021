//! SeaORM entity models
//!
//! Database entities for Bibforge

mod citation;

pub use citation::{
    Entity as CitationEntity,
    Model as Citation,
    ActiveModel as CitationActiveModel,
    Column as CitationColumn,
    CitationInput,
};
