//! Mutation operations for SeaOrmStorage
//!
//! This module contains all write database operations. Each one runs in its
//! own transaction: commit on success, rollback before the error propagates.

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{hostname_location_to_active_model, ip_location_to_active_model};
use crate::errors::{IpLocatorError, Result};
use crate::storage::models::{HostnameLocationRecord, IpLocationRecord};

use migration::entities::{hostname_location, ip_location};

impl SeaOrmStorage {
    /// 插入一条 IP 位置记录，返回数据库分配的 id
    ///
    /// 只读借用入参：id 由数据库分配，调用方的记录不会被改写，
    /// 同一个值可以安全地重复插入。
    pub async fn insert_ip_location(&self, record: &IpLocationRecord) -> Result<i32> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| IpLocatorError::database_operation(format!("开始事务失败: {}", e)))?;

        let model = ip_location_to_active_model(record)
            .insert(&txn)
            .await
            .map_err(|e| {
                IpLocatorError::database_operation(format!("插入 IP 位置记录失败: {}", e))
            })?;

        txn.commit()
            .await
            .map_err(|e| IpLocatorError::database_operation(format!("提交事务失败: {}", e)))?;

        info!("IP location stored: {} (id {})", record.ip, model.id);
        Ok(model.id)
    }

    /// 插入一条主机名位置记录，返回数据库分配的 id
    pub async fn insert_hostname_location(&self, record: &HostnameLocationRecord) -> Result<i32> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| IpLocatorError::database_operation(format!("开始事务失败: {}", e)))?;

        let model = hostname_location_to_active_model(record)
            .insert(&txn)
            .await
            .map_err(|e| {
                IpLocatorError::database_operation(format!("插入主机名位置记录失败: {}", e))
            })?;

        txn.commit()
            .await
            .map_err(|e| IpLocatorError::database_operation(format!("提交事务失败: {}", e)))?;

        info!(
            "Hostname location stored: {} (id {})",
            record.hostname, model.id
        );
        Ok(model.id)
    }

    /// 按 id 删除一条 IP 位置记录；id 不存在时静默成功
    pub async fn delete_ip_by_id(&self, id: i32) -> Result<()> {
        let result = ip_location::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                IpLocatorError::database_operation(format!("删除 IP 位置记录失败: {}", e))
            })?;

        info!(
            "Deleted {} ip location row(s) by id {}",
            result.rows_affected, id
        );
        Ok(())
    }

    /// 按 id 删除一条主机名位置记录；id 不存在时静默成功
    pub async fn delete_hostname_by_id(&self, id: i32) -> Result<()> {
        let result = hostname_location::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                IpLocatorError::database_operation(format!("删除主机名位置记录失败: {}", e))
            })?;

        info!(
            "Deleted {} hostname location row(s) by id {}",
            result.rows_affected, id
        );
        Ok(())
    }

    /// 删除某个 IP 的全部记录（一个事务内批量删除）；零匹配也算成功
    pub async fn delete_by_ip(&self, ip: &str) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| IpLocatorError::database_operation(format!("开始事务失败: {}", e)))?;

        let result = ip_location::Entity::delete_many()
            .filter(ip_location::Column::Ip.eq(ip))
            .exec(&txn)
            .await
            .map_err(|e| {
                IpLocatorError::database_operation(format!("删除 IP 位置记录失败: {}", e))
            })?;

        txn.commit()
            .await
            .map_err(|e| IpLocatorError::database_operation(format!("提交事务失败: {}", e)))?;

        info!(
            "Deleted {} location row(s) for ip {}",
            result.rows_affected, ip
        );
        Ok(())
    }

    /// 删除某个主机名的全部记录（一个事务内批量删除）；零匹配也算成功
    pub async fn delete_by_hostname(&self, hostname: &str) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| IpLocatorError::database_operation(format!("开始事务失败: {}", e)))?;

        let result = hostname_location::Entity::delete_many()
            .filter(hostname_location::Column::Hostname.eq(hostname))
            .exec(&txn)
            .await
            .map_err(|e| {
                IpLocatorError::database_operation(format!("删除主机名位置记录失败: {}", e))
            })?;

        txn.commit()
            .await
            .map_err(|e| IpLocatorError::database_operation(format!("提交事务失败: {}", e)))?;

        info!(
            "Deleted {} location row(s) for hostname {}",
            result.rows_affected, hostname
        );
        Ok(())
    }
}
