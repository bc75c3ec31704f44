use serde::Serialize;

use super::entities::{Delivery, DeliveryLookup, DisplayStatus};

/// 查询结果与派生的展示状态
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryLookupResponse {
    pub display_status: DisplayStatus,
    pub lookup: DeliveryLookup,
}

/// 批改失败的原因
#[derive(Debug, Clone, Serialize)]
pub struct ReviewFailure {
    pub code: &'static str,
    pub message: String,
}

/// 单条批改结果
#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcomeItem {
    pub delivery_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<Delivery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReviewFailure>,
}

/// 批量批改结果，允许部分成功
#[derive(Debug, Clone, Serialize)]
pub struct ReviewBatchResponse {
    pub items: Vec<ReviewOutcomeItem>,
    pub succeeded: usize,
    pub failed: usize,
}

/// 各展示状态的数量
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DisplayStatusCounts {
    pub awaiting: usize,
    pub approved: usize,
    pub returned: usize,
    pub late: usize,
}

impl DisplayStatusCounts {
    pub fn record(&mut self, status: DisplayStatus) {
        match status {
            DisplayStatus::Awaiting => self.awaiting += 1,
            DisplayStatus::Approved => self.approved += 1,
            DisplayStatus::Returned => self.returned += 1,
            DisplayStatus::Late => self.late += 1,
            // 没有记录就不会出现在列表中
            DisplayStatus::NotDelivered => {}
        }
    }

    pub fn total(&self) -> usize {
        self.awaiting + self.approved + self.returned + self.late
    }
}

/// 某个内容下的全部提交（批改队列）
#[derive(Debug, Clone, Serialize)]
pub struct PostDeliverySummary {
    pub post_id: String,
    pub items: Vec<Delivery>,
    pub counts: DisplayStatusCounts,
}
