//! Payload decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Backend, ClientError, Resource};

/// Decode the body of `resource` into `T`.
///
/// The Nagios XI API reports problems such as an invalid key with HTTP 200
/// and a body of `{"error": "..."}`; that shape becomes [`ClientError::Api`].
/// Unknown fields are ignored.
pub fn decode<T: DeserializeOwned>(resource: Resource, bytes: &[u8]) -> Result<T, ClientError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| schema_error(resource, e))?;

    if let Some(message) = api_error(&value) {
        return Err(ClientError::Api(message));
    }

    serde_json::from_value(value).map_err(|e| schema_error(resource, e))
}

/// Fetch `resource` from `backend` and decode it.
pub async fn fetch_decoded<B, T>(backend: &B, resource: Resource) -> Result<T, ClientError>
where
    B: Backend + ?Sized,
    T: DeserializeOwned,
{
    let body = backend.fetch(resource).await?;
    decode(resource, &body)
}

fn api_error(value: &Value) -> Option<String> {
    match value.as_object()?.get("error")? {
        Value::String(message) => Some(message.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn schema_error(resource: Resource, err: serde_json::Error) -> ClientError {
    ClientError::Schema {
        resource,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use nagios_types::{HostStatusList, ServiceStatusList, SystemInfo, SystemStatus};

    use super::*;

    #[test]
    fn test_decode_status() {
        let status: SystemStatus =
            decode(Resource::SystemStatus, br#"{"is_currently_running": "1"}"#).unwrap();
        assert!(status.is_running());
    }

    #[test]
    fn test_decode_version_is_not_numeric() {
        let info: SystemInfo = decode(
            Resource::SystemInfo,
            br#"{"product": "nagiosxi", "version": "5.8.10"}"#,
        )
        .unwrap();
        assert_eq!(info.version, "5.8.10");
    }

    #[test]
    fn test_decode_host_list() {
        let body = br#"{
            "recordcount": "2",
            "hoststatus": [
                {"host_object_id": "1", "check_type": "0", "current_state": "0",
                 "is_flapping": "0", "scheduled_downtime_depth": "0", "notes": ""},
                {"host_object_id": "2", "check_type": "1", "current_state": "2",
                 "is_flapping": "1", "scheduled_downtime_depth": "0"}
            ]
        }"#;
        let list: HostStatusList = decode(Resource::HostStatus, body).unwrap();
        assert_eq!(list.hoststatus.len(), 2);
        assert_eq!(list.record_count_mismatch(), None);
    }

    #[test]
    fn test_api_error_envelope() {
        let err = decode::<HostStatusList>(
            Resource::HostStatus,
            br#"{"error": "Invalid API Key"}"#,
        )
        .unwrap_err();
        match err {
            ClientError::Api(message) => assert_eq!(message, "Invalid API Key"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_error_field_is_not_an_error() {
        let info: SystemInfo =
            decode(Resource::SystemInfo, br#"{"error": null, "version": "2024R1"}"#).unwrap();
        assert_eq!(info.version, "2024R1");
    }

    #[test]
    fn test_schema_errors() {
        let err = decode::<SystemStatus>(Resource::SystemStatus, b"<html>502</html>").unwrap_err();
        assert!(matches!(
            err,
            ClientError::Schema {
                resource: Resource::SystemStatus,
                ..
            }
        ));

        let err = decode::<ServiceStatusList>(
            Resource::ServiceStatus,
            br#"{"recordcount": "1", "servicestatus": [{"check_type": "0"}]}"#,
        )
        .unwrap_err();
        match err {
            ClientError::Schema { resource, message } => {
                assert_eq!(resource, Resource::ServiceStatus);
                assert!(message.contains("current_state"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = decode::<SystemInfo>(Resource::SystemInfo, b"[]").unwrap_err();
        assert!(matches!(err, ClientError::Schema { .. }));
    }

    struct Canned(&'static [u8]);

    #[async_trait]
    impl Backend for Canned {
        async fn fetch(&self, _resource: Resource) -> Result<Vec<u8>, ClientError> {
            Ok(self.0.to_vec())
        }
    }

    #[tokio::test]
    async fn test_fetch_decoded() {
        let backend = Canned(br#"{"version": "5.11.0"}"#);
        let info: SystemInfo = fetch_decoded(&backend, Resource::SystemInfo).await.unwrap();
        assert_eq!(info.version, "5.11.0");

        let err = fetch_decoded::<_, SystemStatus>(&backend, Resource::SystemStatus)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Schema { .. }));
    }
}
