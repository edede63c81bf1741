//! Price lookup used to value holdings.

mod price_provider;

pub use price_provider::{
    collect_symbols, MockPriceProvider, NoPriceProvider, PriceProvider, StaticPriceProvider,
};
