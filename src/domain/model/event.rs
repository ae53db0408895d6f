use crate::domain::error::DomainError;
use crate::domain::model::{EventDate, EventId, Money, TicketTier};

use std::collections::BTreeMap;

/// イベント集約
/// チケットティアごとの在庫を管理し、予約・キャンセルによる増減ルールを適用する
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    id: EventId,
    name: String,
    location: String,
    date: EventDate,
    // ティアは名前順で列挙される（表示インデックスの安定性のためBTreeMap）
    tiers: BTreeMap<String, TicketTier>,
}

impl Event {
    /// 新しいイベントを作成
    /// イベント名は空であってはならない
    pub fn new(
        id: EventId,
        name: String,
        location: String,
        date: EventDate,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "event name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id,
            name,
            location,
            date,
            tiers: BTreeMap::new(),
        })
    }

    /// ストアから読み込んだデータでイベントを再構築
    /// リポジトリでの使用を想定
    pub fn reconstruct(
        id: EventId,
        name: String,
        location: String,
        date: EventDate,
        tiers: BTreeMap<String, TicketTier>,
    ) -> Self {
        Self {
            id,
            name,
            location,
            date,
            tiers,
        }
    }

    /// イベントIDを取得
    pub fn id(&self) -> EventId {
        self.id
    }

    /// イベント名を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 開催場所を取得
    pub fn location(&self) -> &str {
        &self.location
    }

    /// 開催日を取得
    pub fn date(&self) -> EventDate {
        self.date
    }

    /// ティアの一覧を名前順で取得
    pub fn tiers(&self) -> &BTreeMap<String, TicketTier> {
        &self.tiers
    }

    /// 名前でティアを取得
    pub fn tier(&self, name: &str) -> Option<&TicketTier> {
        self.tiers.get(name)
    }

    /// ティアを追加する
    /// 同名のティアが既に存在する場合は単価・残数を丸ごと置き換える（マージしない）
    /// ティア名は永続化レイアウトの区切り文字（コロン・カンマ）を含んではならない
    pub fn add_tier(
        &mut self,
        name: impl Into<String>,
        unit_price: Money,
        quantity: u32,
    ) -> Result<(), DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::InvalidValue(
                "tier name must not be empty".to_string(),
            ));
        }
        if name.contains(':') || name.contains(',') {
            return Err(DomainError::InvalidValue(format!(
                "tier name must not contain ':' or ',': {}",
                name
            )));
        }
        self.tiers.insert(name, TicketTier::new(unit_price, quantity));
        Ok(())
    }

    /// 全ティアの残数の合計
    pub fn total_available(&self) -> u32 {
        self.tiers.values().map(|tier| tier.remaining()).sum()
    }

    /// 指定ティアのチケットを確保する
    ///
    /// # Returns
    /// * `Ok(())` - 確保成功（残数が減る）
    /// * `Err(DomainError::TierNotFound)` - ティアが存在しない
    /// * `Err(DomainError::InsufficientInventory)` - 0枚の要求または在庫不足
    pub fn reserve_tickets(&mut self, tier_name: &str, quantity: u32) -> Result<(), DomainError> {
        let tier = self
            .tiers
            .get_mut(tier_name)
            .ok_or_else(|| DomainError::TierNotFound(tier_name.to_string()))?;
        tier.reserve(quantity)
    }

    /// 指定ティアへチケットを戻す（キャンセル時）
    /// ティアが既に存在しない場合は何もしない
    pub fn release_tickets(&mut self, tier_name: &str, quantity: u32) {
        if let Some(tier) = self.tiers.get_mut(tier_name) {
            tier.release(quantity);
        }
    }
}
