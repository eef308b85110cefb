//! Outbound HTTP: the client trait and its implementations.

mod client;

pub use client::{
    FetchedImage, HttpClient, MockClient, MockResponse, WebClient, WebClientBuilder,
};
