//! File attachments on cards.
//!
//! File content travels as base64, optionally wrapped in a `data:` URL, and is
//! stored in that form. It is decoded once on upload to check it and measure
//! its size.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{info, warn};
use sea_orm::TransactionTrait;

use super::error::{ApiError, ApiResult};
use super::types::AttachmentInfo;
use super::{validation, WorkShiftApi};
use crate::constants::{DEFAULT_MIME_TYPE, FILE_NAME_MAX_LEN};
use crate::repositories::attachment::NewAttachment;
use crate::repositories::AttachmentRepository;

/// Base64 payload, with the MIME type when given as a `data:` URL.
fn split_data_url(input: &str) -> (Option<&str>, &str) {
    let input = input.trim();
    if let Some(rest) = input.strip_prefix("data:") {
        if let Some((header, payload)) = rest.split_once(',') {
            if let Some(mime) = header.strip_suffix(";base64") {
                let mime = (!mime.is_empty()).then_some(mime);
                return (mime, payload);
            }
        }
    }
    (None, input)
}

fn mime_type(value: &str) -> ApiResult<String> {
    let value = value.trim().to_lowercase();
    match value.split_once('/') {
        Some((kind, sub)) if !kind.is_empty() && !sub.is_empty() && !value.contains(char::is_whitespace) => Ok(value),
        _ => Err(ApiError::validation(format!("'{}' is not a MIME type", value))),
    }
}

impl WorkShiftApi {
    /// Attach a file to a card.
    ///
    /// `file_data` is base64 or a base64 `data:` URL. The MIME type falls back to
    /// the one of the data URL, then to `application/octet-stream`.
    pub async fn add_attachment(
        &self,
        card_id: i32,
        file_name: &str,
        mime: Option<&str>,
        file_data: &str,
    ) -> ApiResult<AttachmentInfo> {
        let session = self.require_session().await?;
        let file_name = validation::required_text("File name", file_name, FILE_NAME_MAX_LEN)?;

        let (url_mime, payload) = split_data_url(file_data);
        let mime = mime_type(mime.or(url_mime).unwrap_or(DEFAULT_MIME_TYPE))?;

        let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        if payload.is_empty() {
            return Err(ApiError::validation("file data cannot be empty"));
        }
        let bytes = STANDARD
            .decode(&payload)
            .map_err(|e| ApiError::validation(format!("file data is not valid base64: {}", e)))?;

        let max = self.config.attachments.max_size_bytes;
        if bytes.len() as u64 > max {
            warn!("Rejected '{}': {} bytes exceeds {}", file_name, bytes.len(), max);
            return Err(ApiError::validation(format!(
                "'{}' is {} bytes, the limit is {} bytes",
                file_name,
                bytes.len(),
                max
            )));
        }

        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        Self::card_access(&txn, card_id, session.user.id).await?;
        let attachment = AttachmentRepository::create(
            &txn,
            NewAttachment {
                card_id,
                file_name: &file_name,
                mime_type: &mime,
                file_size: bytes.len() as i64,
                file_data: payload,
                uploaded_by: session.user.id,
            },
        )
        .await?;
        txn.commit().await?;

        info!(
            "Attached '{}' ({} bytes) to card {}",
            attachment.file_name, attachment.file_size, card_id
        );
        Ok(attachment.into())
    }

    /// Attachment metadata of a card, oldest first.
    pub async fn list_attachments(&self, card_id: i32) -> ApiResult<Vec<AttachmentInfo>> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        Self::card_access(&storage.conn, card_id, session.user.id).await?;

        Ok(AttachmentRepository::get_for_card(&storage.conn, card_id)
            .await?
            .into_iter()
            .map(AttachmentInfo::from)
            .collect())
    }

    /// Decoded content of an attachment.
    pub async fn get_attachment_data(&self, attachment_id: i32) -> ApiResult<Vec<u8>> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;

        let attachment = AttachmentRepository::get_by_id(&storage.conn, attachment_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Attachment", attachment_id))?;
        Self::card_access(&storage.conn, attachment.card_id, session.user.id).await?;

        STANDARD
            .decode(&attachment.file_data)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("attachment {} is corrupt: {}", attachment_id, e)))
    }

    /// Delete an attachment. Its uploader and the board's owners and admins may.
    pub async fn delete_attachment(&self, attachment_id: i32) -> ApiResult<()> {
        let session = self.require_session().await?;
        let storage = self.storage.lock().await;
        let txn = storage.conn.begin().await?;

        let attachment = AttachmentRepository::get_by_id(&txn, attachment_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Attachment", attachment_id))?;
        let (_, _, access) = Self::card_access(&txn, attachment.card_id, session.user.id).await?;
        if attachment.uploaded_by != session.user.id && !access.role.can_manage() {
            return Err(ApiError::forbidden(
                "only the uploader or a board admin can delete an attachment",
            ));
        }

        AttachmentRepository::delete(&txn, attachment_id).await?;
        txn.commit().await?;

        info!("Deleted attachment {} from card {}", attachment_id, attachment.card_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_urls_are_unwrapped() {
        assert_eq!(split_data_url("data:text/plain;base64,aGk="), (Some("text/plain"), "aGk="));
        assert_eq!(split_data_url("data:;base64,aGk="), (None, "aGk="));
        assert_eq!(split_data_url(" aGk= "), (None, "aGk="));
    }

    #[test]
    fn mime_types_are_checked() {
        assert_eq!(mime_type("Image/PNG").unwrap(), "image/png");
        assert!(mime_type("png").is_err());
        assert!(mime_type("text/").is_err());
    }
}
