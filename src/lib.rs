//! Stickyboard - Main Library
//!
//! Stickyboard is a shared sticky-notes board server built with Rust.
//! Users register, authenticate, and create, move, annotate, like/dislike,
//! and organize notes on a shared "main" board or their personal "profile"
//! board, with live updates pushed to connected clients over SSE.
//!
//! # Overview
//!
//! This library provides the core functionality for Stickyboard, including:
//! - REST API for notes, boards, registration, and profiles
//! - JWT-based authentication with access and refresh tokens
//! - Real-time note broadcasting to SSE subscribers
//! - AI-assisted note creation and analysis (Gemini integration)
//! - Subscription billing (Stripe integration)
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Domain types used across module boundaries
//!   - Note entity, status and board enums
//!   - Real-time event types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server, route configuration, middleware
//!   - Authentication, notes, boards, AI, and billing handlers
//!   - Database persistence and real-time broadcasting

pub mod backend;
pub mod shared;
