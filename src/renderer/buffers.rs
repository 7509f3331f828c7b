use crate::renderer::backend::{Backend, BufferHandle};
use crate::renderer::RenderError;

/// Uploads every buffer, unmodified, into its own immutable GPU buffer. The
/// returned handles are in the same order as `buffers`.
///
/// If any upload fails, the buffers created so far are deleted again.
pub fn upload_buffers<B: Backend>(
    backend: &mut B,
    buffers: &[Vec<u8>],
) -> Result<Vec<BufferHandle>, RenderError> {
    let mut handles = Vec::with_capacity(buffers.len());
    for (i, bytes) in buffers.iter().enumerate() {
        match backend.create_buffer(bytes) {
            Ok(handle) => handles.push(handle),
            Err(err) => {
                log::error!("uploading buffer {i} ({} bytes) failed: {err}", bytes.len());
                backend.delete_buffers(&handles);
                return Err(err.into());
            }
        }
    }
    log::debug!(
        "uploaded {} buffers, {} bytes in total",
        handles.len(),
        buffers.iter().map(Vec::len).sum::<usize>(),
    );
    Ok(handles)
}
