use crate::storage::models::{HostnameLocationRecord, IpLocationRecord};
use migration::entities::{hostname_location, ip_location};

/// 将 Sea-ORM Model 转换为 IpLocationRecord
///
/// 时间戳在实体层就是 UTC 类型：历史上无时区信息的行在解码时按 UTC
/// 处理，读取不会因此失败。
pub fn model_to_ip_location(model: ip_location::Model) -> IpLocationRecord {
    IpLocationRecord {
        id: Some(model.id),
        ip: model.ip,
        latitude: model.latitude,
        longitude: model.longitude,
        timestamp: model.timestamp,
    }
}

/// 将 Sea-ORM Model 转换为 HostnameLocationRecord
pub fn model_to_hostname_location(model: hostname_location::Model) -> HostnameLocationRecord {
    HostnameLocationRecord {
        id: Some(model.id),
        hostname: model.hostname,
        latitude: model.latitude,
        longitude: model.longitude,
        timestamp: model.timestamp,
    }
}

/// 将 IpLocationRecord 转换为 ActiveModel（用于插入）
///
/// `id` 一律 NotSet：主键由数据库分配，调用方的记录不会被写回。
pub fn ip_location_to_active_model(record: &IpLocationRecord) -> ip_location::ActiveModel {
    use sea_orm::ActiveValue::*;

    ip_location::ActiveModel {
        id: NotSet,
        ip: Set(record.ip.clone()),
        latitude: Set(record.latitude),
        longitude: Set(record.longitude),
        timestamp: Set(record.timestamp),
    }
}

/// 将 HostnameLocationRecord 转换为 ActiveModel（用于插入）
pub fn hostname_location_to_active_model(
    record: &HostnameLocationRecord,
) -> hostname_location::ActiveModel {
    use sea_orm::ActiveValue::*;

    hostname_location::ActiveModel {
        id: NotSet,
        hostname: Set(record.hostname.clone()),
        latitude: Set(record.latitude),
        longitude: Set(record.longitude),
        timestamp: Set(record.timestamp),
    }
}
