//! Concrete Future types for off-thread token operations.
//!
//! RSA signing is CPU-bound, so the async facade runs work on the blocking
//! pool and hands the result back over a oneshot channel.

use crate::{
    error::{FailureReason, JwtError, JwtResult},
    types::Token,
    validator::ValidationResult,
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot;

/// Future for token creation.
pub struct TokenFuture {
    rx: oneshot::Receiver<JwtResult<Token>>,
}

impl TokenFuture {
    pub(crate) fn new(rx: oneshot::Receiver<JwtResult<Token>>) -> Self {
        Self { rx }
    }
}

impl Future for TokenFuture {
    type Output = JwtResult<Token>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(JwtError::TaskFailed)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Future for token validation.
///
/// A lost worker resolves to a rejected result rather than an error, so the
/// outcome stays a plain [`ValidationResult`].
pub struct ValidationFuture {
    rx: oneshot::Receiver<ValidationResult>,
}

impl ValidationFuture {
    pub(crate) fn new(rx: oneshot::Receiver<ValidationResult>) -> Self {
        Self { rx }
    }
}

impl Future for ValidationFuture {
    type Output = ValidationResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => {
                tracing::error!("validation task dropped its result");
                Poll::Ready(ValidationResult::rejected(FailureReason::KeyUnavailable))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
