pub mod product;
pub mod pricing;
pub mod sizes;
pub mod view;
pub mod card;
pub mod render;

pub use product::{Product, ProductError};
pub use pricing::{PriceDisplay, PricingConfig, PricingEngine};
pub use sizes::{BatchError, BatchLine, BatchRequest, QuantityError, SizeBuckets, SizeMatrix};
pub use view::{Expansion, ItemAction, ItemActionError, ItemViewState};
pub use card::{CardAction, CatalogCard};
pub use render::{Notice, NoticeLevel, StorefrontPage};
