use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 ip_address 表
        manager
            .create_table(
                Table::create()
                    .table(IpAddress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IpAddress::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(IpAddress::Ip).string().not_null())
                    .col(ColumnDef::new(IpAddress::Latitude).double().not_null())
                    .col(ColumnDef::new(IpAddress::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(IpAddress::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ip 不唯一（同一地址允许多条历史记录），只建普通索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ip_address_ip")
                    .table(IpAddress::Table)
                    .col(IpAddress::Ip)
                    .to_owned(),
            )
            .await?;

        // 创建 url_address 表
        manager
            .create_table(
                Table::create()
                    .table(UrlAddress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UrlAddress::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UrlAddress::Hostname).string().not_null())
                    .col(ColumnDef::new(UrlAddress::Latitude).double().not_null())
                    .col(ColumnDef::new(UrlAddress::Longitude).double().not_null())
                    .col(
                        ColumnDef::new(UrlAddress::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_url_address_hostname")
                    .table(UrlAddress::Table)
                    .col(UrlAddress::Hostname)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除索引
        manager
            .drop_index(Index::drop().name("idx_url_address_hostname").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_ip_address_ip").to_owned())
            .await?;

        // 删除表
        manager
            .drop_table(Table::drop().table(UrlAddress::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(IpAddress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum IpAddress {
    #[sea_orm(iden = "ip_address")]
    Table,
    Id,
    Ip,
    Latitude,
    Longitude,
    Timestamp,
}

#[derive(DeriveIden)]
enum UrlAddress {
    #[sea_orm(iden = "url_address")]
    Table,
    Id,
    Hostname,
    Latitude,
    Longitude,
    Timestamp,
}
