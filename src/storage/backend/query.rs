//! Query operations for SeaOrmStorage
//!
//! This module contains all read-only database operations. Results come back
//! in storage-default order, which for these append-only tables is insertion
//! order.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use super::SeaOrmStorage;
use super::converters::{model_to_hostname_location, model_to_ip_location};
use crate::errors::{IpLocatorError, Result};
use crate::storage::models::{HostnameLocationRecord, IpLocationRecord};

use migration::entities::{hostname_location, ip_location};

impl SeaOrmStorage {
    /// 加载全部 IP 位置记录
    pub async fn select_all_ip(&self) -> Result<Vec<IpLocationRecord>> {
        let models = ip_location::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| {
                IpLocatorError::database_operation(format!("加载 IP 位置记录失败: {}", e))
            })?;

        Ok(models.into_iter().map(model_to_ip_location).collect())
    }

    /// 加载全部主机名位置记录
    pub async fn select_all_hostname(&self) -> Result<Vec<HostnameLocationRecord>> {
        let models = hostname_location::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| {
                IpLocatorError::database_operation(format!("加载主机名位置记录失败: {}", e))
            })?;

        Ok(models.into_iter().map(model_to_hostname_location).collect())
    }

    /// 按 id 查找 IP 位置记录；不存在返回 Ok(None)，不是错误
    pub async fn select_ip_by_id(&self, id: i32) -> Result<Option<IpLocationRecord>> {
        let model = ip_location::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                IpLocatorError::database_operation(format!("查询 IP 位置记录失败: {}", e))
            })?;

        Ok(model.map(model_to_ip_location))
    }

    /// 按 id 查找主机名位置记录；不存在返回 Ok(None)，不是错误
    pub async fn select_hostname_by_id(&self, id: i32) -> Result<Option<HostnameLocationRecord>> {
        let model = hostname_location::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                IpLocatorError::database_operation(format!("查询主机名位置记录失败: {}", e))
            })?;

        Ok(model.map(model_to_hostname_location))
    }

    /// 查找某个 IP 的全部记录（字符串精确匹配）
    pub async fn select_by_ip(&self, ip: &str) -> Result<Vec<IpLocationRecord>> {
        let models = ip_location::Entity::find()
            .filter(ip_location::Column::Ip.eq(ip))
            .all(&self.db)
            .await
            .map_err(|e| {
                IpLocatorError::database_operation(format!("查询 IP 位置记录失败: {}", e))
            })?;

        Ok(models.into_iter().map(model_to_ip_location).collect())
    }

    /// 查找某个主机名的全部记录（字符串精确匹配）
    pub async fn select_by_hostname(&self, hostname: &str) -> Result<Vec<HostnameLocationRecord>> {
        let models = hostname_location::Entity::find()
            .filter(hostname_location::Column::Hostname.eq(hostname))
            .all(&self.db)
            .await
            .map_err(|e| {
                IpLocatorError::database_operation(format!("查询主机名位置记录失败: {}", e))
            })?;

        Ok(models.into_iter().map(model_to_hostname_location).collect())
    }
}
