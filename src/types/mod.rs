//! Resource types exchanged with the control-plane API.
//!
//! - [`Vpc`], [`VpcSubnet`]: the resource under test and its nested ranges
//! - [`VpcCreateOptions`], [`VpcUpdateOptions`]: request payloads
//! - [`Region`]: region metadata used for capability lookup
//! - [`ListOptions`], [`Page`]: list filtering and the response envelope

mod page;
mod region;
pub(crate) mod time;
mod vpc;

pub use page::{ListOptions, Page};
pub use region::Region;
pub use vpc::{Vpc, VpcCreateOptions, VpcSubnet, VpcSubnetCreateOptions, VpcUpdateOptions};
