pub mod bucket;
pub mod filter;
pub mod rows;
pub mod transform;
pub mod weights;
