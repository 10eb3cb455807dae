use crate::RequestId;

pub const UPLOAD_FAILED: &str =
    "Error while uploading file, make sure it is (PDF, TXT, DOCX, PPTX)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    None,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct UploadState {
    in_flight: Option<RequestId>,
    file_name: Option<String>,
    status: UploadStatus,
}

impl UploadState {
    pub(crate) fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub(crate) fn status(&self) -> UploadStatus {
        self.status
    }

    pub(crate) fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub(crate) fn begin(&mut self, request_id: RequestId, file_name: Option<String>) {
        self.in_flight = Some(request_id);
        self.file_name = file_name;
        self.status = UploadStatus::None;
    }

    /// Ends the transfer `request_id` with `status`. Returns false and leaves
    /// the state alone if that transfer is not the outstanding one.
    pub(crate) fn finish(&mut self, request_id: RequestId, status: UploadStatus) -> bool {
        if self.in_flight != Some(request_id) {
            return false;
        }
        self.in_flight = None;
        self.status = status;
        true
    }

    pub(crate) fn dismiss(&mut self) -> bool {
        let changed = self.status != UploadStatus::None;
        self.status = UploadStatus::None;
        changed
    }
}
