//! Region operations.

use super::vpc::list_request;
use crate::client::Client;
use crate::types::{ListOptions, Page, Region};
use crate::Error;

impl Client {
    /// Lists regions.
    pub async fn list_regions(&self, opts: Option<&ListOptions>) -> Result<Vec<Region>, Error> {
        let page: Page<Region> = self
            .inner()
            .execute(list_request("/v4/regions", opts)?)
            .await?;
        Ok(page.data)
    }
}
