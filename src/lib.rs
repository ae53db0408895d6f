//! イベントチケット予約管理システム
//! イベント登録・ユーザー登録・チケット予約・キャンセルを
//! コンソールから操作し、状態をフラットファイルに永続化する

pub mod adapter;
pub mod application;
pub mod domain;
