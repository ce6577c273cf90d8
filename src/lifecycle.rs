//! Remote trash / restore transitions for a meeting's recordings.

use std::fmt;

use crate::api::{ApiErrorBody, ApiReply, Meeting, RecordingsApi};
use crate::error::{Error, Result};

/// A completed lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOutcome {
    Trashed,
    Restored,
}

impl fmt::Display for LifecycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleOutcome::Trashed => write!(f, "Trashed"),
            LifecycleOutcome::Restored => write!(f, "Restored"),
        }
    }
}

/// Apply the status contract of the lifecycle endpoints.
///
/// 204 is success. A 200 carries an error document despite the transport
/// succeeding. Anything else is a plain failure.
pub fn interpret_reply(
    reply: ApiReply,
    meeting_uuid: &str,
    success: LifecycleOutcome,
) -> Result<LifecycleOutcome> {
    match reply.status {
        204 => Ok(success),
        200 => {
            let parsed = serde_json::from_str::<ApiErrorBody>(&reply.body);
            let details = match parsed {
                Ok(ApiErrorBody {
                    code,
                    message: Some(message),
                }) => match code {
                    Some(code) => format!("{} (code {})", message, code),
                    None => message,
                },
                _ => reply.body,
            };
            Err(Error::RemoteApiEmbedded {
                uuid: meeting_uuid.to_string(),
                details,
            })
        }
        status => Err(Error::RemoteApi {
            status,
            body: reply.body,
        }),
    }
}

/// Move a meeting's recordings to the trash.
pub async fn trash_meeting(api: &dyn RecordingsApi, meeting: &Meeting) -> Result<LifecycleOutcome> {
    let reply = api.trash_recordings(&meeting.uuid).await?;
    let outcome = interpret_reply(reply, &meeting.uuid, LifecycleOutcome::Trashed)?;
    tracing::info!("Trashed recordings of {} ({})", meeting.id, meeting.uuid);
    Ok(outcome)
}

/// Recover a meeting's recordings from the trash.
pub async fn restore_meeting(
    api: &dyn RecordingsApi,
    meeting: &Meeting,
) -> Result<LifecycleOutcome> {
    let reply = api.recover_recordings(&meeting.uuid).await?;
    let outcome = interpret_reply(reply, &meeting.uuid, LifecycleOutcome::Restored)?;
    tracing::info!("Restored recordings of {} ({})", meeting.id, meeting.uuid);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{meeting, FakeApi};

    #[tokio::test]
    async fn test_trash_204_succeeds() {
        let api = FakeApi::default();
        api.push_lifecycle_reply(204, "");
        let m = meeting("/uu//id==", "1", "t", "2021-03-01T10:00:00Z");

        let outcome = trash_meeting(&api, &m).await.unwrap();
        assert_eq!(outcome, LifecycleOutcome::Trashed);
        assert_eq!(outcome.to_string(), "Trashed");
        assert_eq!(
            api.lifecycle_requests(),
            [("trash".to_string(), "/uu//id==".to_string())]
        );
    }

    #[tokio::test]
    async fn test_trash_200_with_error_body_fails() {
        let api = FakeApi::default();
        api.push_lifecycle_reply(200, r#"{"code": 3301, "message": "This recording does not exist."}"#);
        let m = meeting("uuid-1", "1", "t", "2021-03-01T10:00:00Z");

        match trash_meeting(&api, &m).await {
            Err(Error::RemoteApiEmbedded { uuid, details }) => {
                assert_eq!(uuid, "uuid-1");
                assert_eq!(details, "This recording does not exist. (code 3301)");
            }
            other => panic!("expected embedded API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_restore_other_status_fails() {
        let api = FakeApi::default();
        api.push_lifecycle_reply(404, "gone");
        let m = meeting("uuid-1", "1", "t", "2021-03-01T10:00:00Z");

        assert!(matches!(
            restore_meeting(&api, &m).await,
            Err(Error::RemoteApi { status: 404, ref body }) if body == "gone"
        ));
        assert_eq!(api.lifecycle_requests()[0].0, "recover");
    }

    #[test]
    fn test_200_with_unparsable_body_keeps_raw_text() {
        let reply = ApiReply {
            status: 200,
            body: "oops".into(),
        };
        assert!(matches!(
            interpret_reply(reply, "u", LifecycleOutcome::Restored),
            Err(Error::RemoteApiEmbedded { ref details, .. }) if details == "oops"
        ));
    }
}
