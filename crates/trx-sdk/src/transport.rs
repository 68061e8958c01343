//! Transport layer: one object-safe unary-call trait, a pooled gRPC
//! implementation and a mock for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::{Buf, BufMut, Bytes};
use parking_lot::Mutex;
use tonic::codec::{Codec, DecodeBuf, Decoder, EncodeBuf, Encoder};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::Status;
use tracing::debug;

use crate::pool::ChannelPool;
use crate::SdkError;

/// Object-safe transport: one unary call, request and response as the
/// protobuf-encoded message bytes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one unary call to `path` and return the response bytes
    async fn unary(&self, path: &'static str, request: Bytes) -> Result<Bytes, SdkError>;
}

/// gRPC transport backed by a [`ChannelPool`].
///
/// Every call leases a channel, runs exactly one unary exchange under the
/// pool timeout and the pool's close signal, and returns the channel via
/// the lease guard on every path.
pub struct GrpcTransport {
    pool: Arc<ChannelPool>,
}

impl GrpcTransport {
    /// Wrap a pool
    pub fn new(pool: Arc<ChannelPool>) -> Self {
        GrpcTransport { pool }
    }

    /// The underlying pool
    pub fn pool(&self) -> &Arc<ChannelPool> {
        &self.pool
    }
}

#[async_trait]
impl Transport for GrpcTransport {
    async fn unary(&self, path: &'static str, request: Bytes) -> Result<Bytes, SdkError> {
        let lease = self.pool.lease().await?;
        let mut closed = self.pool.close_signal();

        let call = async {
            let mut grpc = tonic::client::Grpc::new(lease.channel());
            grpc.ready()
                .await
                .map_err(|e| SdkError::Transport(format!("channel not ready: {}", e)))?;
            let response = grpc
                .unary(
                    tonic::Request::new(request),
                    PathAndQuery::from_static(path),
                    RawCodec,
                )
                .await
                .map_err(SdkError::from)?;
            Ok::<Bytes, SdkError>(response.into_inner())
        };

        tokio::select! {
            _ = closed.wait_for(|closed| *closed) => Err(SdkError::PoolClosed),
            result = tokio::time::timeout(self.pool.timeout(), call) => match result {
                Ok(inner) => inner,
                Err(_) => Err(SdkError::Transport(format!(
                    "rpc {} timed out after {:?}",
                    path,
                    self.pool.timeout()
                ))),
            },
        }
    }
}

/// Identity codec: the façade encodes/decodes prost messages itself, the
/// wire layer only moves bytes.
#[derive(Debug, Clone, Default)]
struct RawCodec;

struct RawEncoder;
struct RawDecoder;

impl Codec for RawCodec {
    type Encode = Bytes;
    type Decode = Bytes;
    type Encoder = RawEncoder;
    type Decoder = RawDecoder;

    fn encoder(&mut self) -> Self::Encoder {
        RawEncoder
    }

    fn decoder(&mut self) -> Self::Decoder {
        RawDecoder
    }
}

impl Encoder for RawEncoder {
    type Item = Bytes;
    type Error = Status;

    fn encode(&mut self, item: Bytes, dst: &mut EncodeBuf<'_>) -> Result<(), Status> {
        dst.put(item);
        Ok(())
    }
}

impl Decoder for RawDecoder {
    type Item = Bytes;
    type Error = Status;

    fn decode(&mut self, src: &mut DecodeBuf<'_>) -> Result<Option<Bytes>, Status> {
        Ok(Some(src.copy_to_bytes(src.remaining())))
    }
}

/// Mock transport for tests: responses are queued per method path and
/// every request is recorded for assertions.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<&'static str, VecDeque<Bytes>>>,
    requests: Mutex<Vec<(String, Bytes)>>,
}

impl MockTransport {
    /// Empty mock; calls fail until responses are queued
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a prost message as the next response for `path`
    pub fn push_response<M: prost::Message>(&self, path: &'static str, message: &M) {
        self.responses
            .lock()
            .entry(path)
            .or_default()
            .push_back(Bytes::from(message.encode_to_vec()));
    }

    /// All requests issued so far, in order
    pub fn requests(&self) -> Vec<(String, Bytes)> {
        self.requests.lock().clone()
    }

    /// The last request issued to `path`, decoded
    pub fn last_request<M: prost::Message + Default>(&self, path: &str) -> Option<M> {
        self.requests
            .lock()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .and_then(|(_, bytes)| M::decode(bytes.as_ref()).ok())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn unary(&self, path: &'static str, request: Bytes) -> Result<Bytes, SdkError> {
        debug!(path, "mock rpc");
        self.requests.lock().push((path.to_string(), request));
        let next = self.responses.lock().get_mut(path).and_then(VecDeque::pop_front);
        next.ok_or_else(|| SdkError::Rpc {
            code: 12,
            message: format!("mock has no response queued for {}", path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trx_proto::api::NumberMessage;

    #[tokio::test]
    async fn test_mock_queued_response() {
        let mock = MockTransport::new();
        mock.push_response("/protocol.Wallet/GetBlockByNum", &NumberMessage { num: 7 });

        let response = mock
            .unary("/protocol.Wallet/GetBlockByNum", Bytes::new())
            .await
            .unwrap();
        let decoded = <NumberMessage as prost::Message>::decode(response.as_ref()).unwrap();
        assert_eq!(decoded.num, 7);
    }

    #[tokio::test]
    async fn test_mock_responses_consumed_in_order() {
        let mock = MockTransport::new();
        mock.push_response("/x", &NumberMessage { num: 1 });
        mock.push_response("/x", &NumberMessage { num: 2 });

        let first = mock.unary("/x", Bytes::new()).await.unwrap();
        let second = mock.unary("/x", Bytes::new()).await.unwrap();
        assert_eq!(<NumberMessage as prost::Message>::decode(first.as_ref()).unwrap().num, 1);
        assert_eq!(<NumberMessage as prost::Message>::decode(second.as_ref()).unwrap().num, 2);
    }

    #[tokio::test]
    async fn test_mock_unqueued_method_errors() {
        let mock = MockTransport::new();
        assert!(mock.unary("/unknown", Bytes::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_records_requests() {
        let mock = MockTransport::new();
        mock.push_response("/x", &NumberMessage { num: 1 });
        let request = NumberMessage { num: 42 };
        mock.unary("/x", Bytes::from(prost::Message::encode_to_vec(&request)))
            .await
            .unwrap();

        let recorded: NumberMessage = mock.last_request("/x").unwrap();
        assert_eq!(recorded.num, 42);
    }
}
