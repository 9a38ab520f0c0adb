//! Domain DTOs for the catalog API.
//!
//! # Design
//! Each resource has a summary shape returned by list calls (`*Resume`) and
//! a detail shape returned by single-item fetches, which flattens the
//! summary and adds the remaining fields. Fields the API omits for some
//! records are `Option` or default to empty, so a sparse record still
//! decodes; anything structurally wrong is a decode error.

mod card;
mod pricing;
mod set;

pub use card::{
    Booster, Card, CardAbility, CardAttack, CardItem, CardResume, CardVariants, CardWeakRes,
    Damage, Legal,
};
pub use pricing::{CardmarketPricing, Pricing, TcgPlayerPriceVariant, TcgPlayerPricing};
pub use set::{Serie, SerieResume, Set, SetCardCount, SetResume};
