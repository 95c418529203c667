//! エンドポイント登録管理
//!
//! サイト一覧からエンドポイントを読み込み、最新のヘルス状態をメモリ内で管理する

pub mod endpoints;
pub mod source;

pub use endpoints::EndpointRegistry;
pub use source::{EndpointSource, FileEndpointSource, StaticEndpointSource};
