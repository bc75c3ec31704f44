//! 提交存储操作

use super::SeaOrmStorage;
use crate::entity::deliveries::{ActiveModel, Column, Entity as Deliveries};
use crate::errors::{DeliveryError, Result};
use crate::models::deliveries::entities::Delivery;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 创建提交
    pub async fn insert_delivery_impl(&self, delivery: Delivery) -> Result<Delivery> {
        let model = ActiveModel::from_delivery(&delivery)?;

        let result = model.insert(&self.db).await.map_err(|e| {
            // 唯一索引冲突保持为 DuplicateDelivery
            match DeliveryError::from(e) {
                DeliveryError::DuplicateDelivery(_) => DeliveryError::duplicate_delivery(format!(
                    "学生 {} 已提交过内容 {}",
                    delivery.student_id, delivery.post_id
                )),
                other => DeliveryError::persistence(format!("创建提交失败: {other}")),
            }
        })?;

        result.into_delivery()
    }

    /// 按 ID 覆盖提交
    pub async fn update_delivery_impl(&self, delivery: Delivery) -> Result<Option<Delivery>> {
        let existing = Deliveries::find_by_id(delivery.id.clone())
            .one(&self.db)
            .await
            .map_err(|e| DeliveryError::persistence(format!("查询提交失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        // 学生和内容不可变
        if existing.student_id != delivery.student_id || existing.post_id != delivery.post_id {
            return Err(DeliveryError::validation(format!(
                "提交 {} 的学生或内容不可修改",
                delivery.id
            )));
        }

        let result = ActiveModel::from_delivery(&delivery)?
            .update(&self.db)
            .await
            .map_err(|e| DeliveryError::persistence(format!("更新提交失败: {e}")))?;

        result.into_delivery().map(Some)
    }

    /// 通过 ID 获取提交
    pub async fn get_delivery_by_id_impl(&self, delivery_id: &str) -> Result<Option<Delivery>> {
        let result = Deliveries::find_by_id(delivery_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| DeliveryError::persistence(format!("查询提交失败: {e}")))?;

        result.map(|m| m.into_delivery()).transpose()
    }

    /// 获取学生对某内容的提交
    pub async fn get_delivery_by_student_and_post_impl(
        &self,
        student_id: &str,
        post_id: &str,
    ) -> Result<Option<Delivery>> {
        let result = Deliveries::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(|e| DeliveryError::persistence(format!("查询提交失败: {e}")))?;

        result.map(|m| m.into_delivery()).transpose()
    }

    /// 列出某内容下的提交
    pub async fn list_deliveries_by_post_impl(&self, post_id: &str) -> Result<Vec<Delivery>> {
        let results = Deliveries::find()
            .filter(Column::PostId.eq(post_id))
            .order_by_desc(Column::SubmittedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DeliveryError::persistence(format!("查询提交列表失败: {e}")))?;

        results.into_iter().map(|m| m.into_delivery()).collect()
    }
}
