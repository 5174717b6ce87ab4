use std::io;
use std::io::SeekFrom;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

use crate::application::ports::UploadSource;

use super::local_store::WRITE_CHUNK_SIZE;

/// Wraps a seekable reader such as a spooled file.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

#[async_trait::async_trait]
impl<R> UploadSource for ReaderSource<R>
where
    R: AsyncRead + AsyncSeek + Unpin + Send,
{
    async fn rewind(&mut self) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(0)).await.map(|_| ())
    }

    async fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        let mut buf = BytesMut::with_capacity(WRITE_CHUNK_SIZE);
        let read = self.reader.read_buf(&mut buf).await?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(buf.freeze()))
    }
}

/// Forward-only byte stream, e.g. a request body.
pub struct StreamSource<'a> {
    stream: BoxStream<'a, Result<Bytes, io::Error>>,
}

impl<'a> StreamSource<'a> {
    pub fn new(stream: BoxStream<'a, Result<Bytes, io::Error>>) -> Self {
        Self { stream }
    }
}

#[async_trait::async_trait]
impl UploadSource for StreamSource<'_> {
    async fn rewind(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "byte stream cannot be rewound",
        ))
    }

    async fn next_chunk(&mut self) -> io::Result<Option<Bytes>> {
        self.stream.next().await.transpose()
    }
}
