use reqwest::{
    RequestBuilder,
    header::{AUTHORIZATION, HeaderValue},
};

use crate::ClientError;

/// Caller identity attached to every request.
///
/// Anonymous requests carry no `Authorization` header; the backend answers
/// them with 401, surfaced as [`ClientError::SessionExpired`].
#[derive(Clone, Debug, Default)]
pub struct Credential {
    header: Option<HeaderValue>,
}

impl Credential {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn bearer(token: &str) -> Result<Self, ClientError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ClientError::InvalidArgument(
                "bearer token must not be empty".to_string(),
            ));
        }
        let mut header = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            ClientError::InvalidArgument("bearer token contains invalid characters".to_string())
        })?;
        header.set_sensitive(true);
        Ok(Self {
            header: Some(header),
        })
    }

    /// `bearer` when a token is configured, anonymous otherwise.
    pub fn from_token(token: Option<&str>) -> Result<Self, ClientError> {
        match token {
            Some(token) if !token.trim().is_empty() => Self::bearer(token),
            _ => Ok(Self::anonymous()),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.header.is_none()
    }

    pub(crate) fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.header {
            Some(header) => req.header(AUTHORIZATION, header.clone()),
            None => req,
        }
    }
}
