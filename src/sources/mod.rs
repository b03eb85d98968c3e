//! Audio sources feeding the conversion pipeline.
//!
//! A source owns a worker task that pushes [`Chunk`](crate::chunk::Chunk)s
//! onto a bounded stream at the source's native sample rate. The real
//! decoder pipeline is an external collaborator; the sine source stands in
//! for it in the demo binary and in tests.

pub mod sine;
