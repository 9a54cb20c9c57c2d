//! VPC operations.

use super::inner::to_body;
use crate::client::Client;
use crate::transport::ApiRequest;
use crate::types::{ListOptions, Page, Vpc, VpcCreateOptions, VpcUpdateOptions};
use crate::Error;

const VPCS_PATH: &str = "/v4/vpcs";

fn vpc_path(id: u64) -> String {
    format!("{}/{}", VPCS_PATH, id)
}

/// Applies list options to a GET request.
pub(super) fn list_request(path: &str, opts: Option<&ListOptions>) -> Result<ApiRequest, Error> {
    let mut request = ApiRequest::get(path);
    if let Some(opts) = opts {
        if let Some(page) = opts.page {
            request = request.with_query("page", page.to_string());
        }
        if let Some(filter) = &opts.filter {
            let encoded = serde_json::to_string(filter)
                .map_err(|e| Error::invalid_argument(format!("Invalid filter: {}", e)))?;
            request = request.with_filter(encoded);
        }
    }
    Ok(request)
}

impl Client {
    /// Creates a VPC.
    ///
    /// ## Example
    ///
    /// ```rust,ignore
    /// let vpc = client
    ///     .create_vpc(VpcCreateOptions::new("my-vpc", "us-east"))
    ///     .await?;
    /// assert_ne!(vpc.id, 0);
    /// ```
    pub async fn create_vpc(&self, opts: VpcCreateOptions) -> Result<Vpc, Error> {
        let request = ApiRequest::post(VPCS_PATH, to_body(&opts)?);
        self.inner().execute(request).await
    }

    /// Gets a VPC by ID.
    pub async fn get_vpc(&self, id: u64) -> Result<Vpc, Error> {
        self.inner().execute(ApiRequest::get(vpc_path(id))).await
    }

    /// Updates the label and description of a VPC.
    pub async fn update_vpc(&self, id: u64, opts: VpcUpdateOptions) -> Result<Vpc, Error> {
        let request = ApiRequest::put(vpc_path(id), to_body(&opts)?);
        self.inner().execute(request).await
    }

    /// Deletes a VPC.
    pub async fn delete_vpc(&self, id: u64) -> Result<(), Error> {
        self.inner().execute_empty(ApiRequest::delete(vpc_path(id))).await
    }

    /// Lists VPCs.
    ///
    /// `None` lists without a filter. Only the requested page is fetched.
    pub async fn list_vpcs(&self, opts: Option<&ListOptions>) -> Result<Vec<Vpc>, Error> {
        let page: Page<Vpc> = self.inner().execute(list_request(VPCS_PATH, opts)?).await?;
        Ok(page.data)
    }
}
