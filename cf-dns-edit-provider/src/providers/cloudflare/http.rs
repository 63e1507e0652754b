//! Cloudflare HTTP 请求方法
//!
//! Every call goes through [`CloudflareStore::send`], which unwraps the
//! `{success, errors, result}` envelope and maps API error codes.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::{CloudflareResponse, CloudflareStore};

impl CloudflareStore {
    /// Perform one request and return the parsed envelope of a successful call.
    async fn send<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        context: ErrorContext,
    ) -> Result<CloudflareResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}", self.base_url);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.api_token);

        if let Some(body) = body {
            let body_json =
                serde_json::to_string(body).map_err(|e| ProviderError::SerializationError {
                    provider: self.provider_name().to_string(),
                    detail: e.to_string(),
                })?;
            log::debug!("[{}] Request Body: {body_json}", self.provider_name());
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body_json);
        }

        let (status, response_text) =
            HttpUtils::execute_request(request, self.provider_name(), method.as_str(), &url)
                .await?;

        let cf_response: CloudflareResponse<T> =
            match HttpUtils::parse_json(&response_text, self.provider_name()) {
                Ok(parsed) => parsed,
                // 401/403 bodies are not always JSON
                Err(_) if status == 401 => {
                    return Err(ProviderError::InvalidCredentials {
                        provider: self.provider_name().to_string(),
                        raw_message: None,
                    });
                }
                Err(_) if status == 403 => {
                    return Err(ProviderError::PermissionDenied {
                        provider: self.provider_name().to_string(),
                        raw_message: None,
                    });
                }
                Err(e) => return Err(e),
            };

        if !cf_response.success {
            let raw = cf_response
                .errors
                .as_deref()
                .and_then(<[_]>::first)
                .map_or_else(
                    || RawApiError::new(format!("HTTP {status}: request failed")),
                    |e| RawApiError::with_code(e.code.to_string(), e.message.clone()),
                );
            let err = match self.map_error(raw, context) {
                ProviderError::Unknown { raw_message, .. } if status == 403 => {
                    ProviderError::PermissionDenied {
                        provider: self.provider_name().to_string(),
                        raw_message: Some(raw_message),
                    }
                }
                other => other,
            };
            if err.is_expected() {
                log::warn!("[{}] API error: {err}", self.provider_name());
            } else {
                log::error!("[{}] API error: {err}", self.provider_name());
            }
            return Err(err);
        }

        Ok(cf_response)
    }

    fn take_result<T>(&self, response: CloudflareResponse<T>) -> Result<T> {
        response
            .result
            .ok_or_else(|| self.parse_error("response is missing the `result` field"))
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let response = self.send::<T, ()>(Method::GET, path, None, context).await?;
        self.take_result(response)
    }

    /// 执行 GET 请求并翻页取回全部结果
    pub(crate) async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        per_page: u32,
        context: ErrorContext,
    ) -> Result<Vec<T>> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let paged = format!("{path}{separator}page={page}&per_page={per_page}");
            let response = self
                .send::<Vec<T>, ()>(Method::GET, &paged, None, context.clone())
                .await?;

            let total_pages = response.result_info.as_ref().and_then(|i| i.total_pages);
            let batch = response.result.unwrap_or_default();
            let batch_len = batch.len();
            items.extend(batch);

            let more = match total_pages {
                Some(total) => page < total,
                None => u32::try_from(batch_len).is_ok_and(|n| n >= per_page),
            };
            if !more || batch_len == 0 {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    /// 执行 POST 请求
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B, context: ErrorContext) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(Method::POST, path, Some(body), context).await?;
        self.take_result(response)
    }

    /// 执行 PATCH 请求
    pub(crate) async fn patch<T, B>(&self, path: &str, body: &B, context: ErrorContext) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(Method::PATCH, path, Some(body), context).await?;
        self.take_result(response)
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let response = self.send::<T, ()>(Method::DELETE, path, None, context).await?;
        self.take_result(response)
    }
}
