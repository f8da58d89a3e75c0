//! Power Cropper
//!
//! 画像フォルダを順に開き、固定サイズまたは任意矩形で切り抜いてPNG保存する。
//! 切り抜き履歴（フォルダ → 画像 → 切り抜き一覧）と、フォルダごとの
//! 最後の切り抜き位置をJSONファイルに永続化する。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod interactive;
pub mod logging;
pub mod scanner;
pub mod session;
pub mod store;
