/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

///! common utility functions for network operations

use std::time::Duration;
use bytes::Bytes;
use reqwest::{Client, StatusCode};

use crate::define_error;

define_error!{ pub NetError =
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    StatusError(StatusCode) : "response status {0}"
}

pub type Result<T> = std::result::Result<T, NetError>;

/// a client with an overall request timeout. The timeout covers connect, request and
/// reading the body so that a slow-to-respond server cannot stall the caller
pub fn timeout_client (timeout: Duration) -> Result<Client> {
    Ok( Client::builder()
        .timeout( timeout)
        .connect_timeout( timeout)
        .build()? )
}

/// retrieve the complete body of a HTTP GET request.
/// Anything but a 200 response is an error
pub async fn get_bytes (client: &Client, url: &str) -> Result<Bytes> {
    let response = client.get(url).send().await?;

    match response.status() {
        StatusCode::OK => {
            Ok( response.bytes().await? )
        }
        StatusCode::NOT_FOUND => {
            Err( NetError::NotFoundError(url.to_string()))
        }
        other => {
            Err( NetError::StatusError(other))
        }
    }
}
