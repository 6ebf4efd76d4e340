use tracing::{debug, warn};

use shared_backend::BackendClient;
use shared_models::ApiResult;

use crate::models::{Conversation, NurseChatRequest, NurseReply, Sender};

pub struct NurseService {
    backend: BackendClient,
}

impl NurseService {
    pub fn new(backend: &BackendClient) -> Self {
        Self {
            backend: backend.clone(),
        }
    }

    pub async fn ask(&self, message: &str) -> ApiResult<NurseReply> {
        debug!("Asking nurse ({} chars)", message.len());

        let request = NurseChatRequest {
            message: message.to_string(),
        };
        self.backend.post("/nurse/chat", &request).await
    }

    /// Records the patient's message, asks, then records the reply.
    /// On failure the patient's message stays in the transcript.
    pub async fn send(&self, conversation: &mut Conversation, text: &str) -> ApiResult<NurseReply> {
        conversation.record(Sender::Patient, text);

        match self.ask(text).await {
            Ok(reply) => {
                conversation.record(Sender::Nurse, reply.reply.clone());
                Ok(reply)
            }
            Err(err) => {
                warn!("Nurse chat failed: {}", err);
                Err(err)
            }
        }
    }
}
