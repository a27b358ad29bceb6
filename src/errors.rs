use std::fmt;

#[derive(Debug, Clone)]
pub enum IpLocatorError {
    HostnameResolution(String),
    Provider(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
}

impl IpLocatorError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            IpLocatorError::HostnameResolution(_) => "E001",
            IpLocatorError::Provider(_) => "E002",
            IpLocatorError::DatabaseConfig(_) => "E003",
            IpLocatorError::DatabaseConnection(_) => "E004",
            IpLocatorError::DatabaseOperation(_) => "E005",
            IpLocatorError::Validation(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            IpLocatorError::HostnameResolution(_) => "Hostname Resolution Error",
            IpLocatorError::Provider(_) => "Location Provider Error",
            IpLocatorError::DatabaseConfig(_) => "Database Configuration Error",
            IpLocatorError::DatabaseConnection(_) => "Database Connection Error",
            IpLocatorError::DatabaseOperation(_) => "Database Operation Error",
            IpLocatorError::Validation(_) => "Validation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            IpLocatorError::HostnameResolution(msg) => msg,
            IpLocatorError::Provider(msg) => msg,
            IpLocatorError::DatabaseConfig(msg) => msg,
            IpLocatorError::DatabaseConnection(msg) => msg,
            IpLocatorError::DatabaseOperation(msg) => msg,
            IpLocatorError::Validation(msg) => msg,
        }
    }
}

impl fmt::Display for IpLocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for IpLocatorError {}

// 便捷的构造函数
impl IpLocatorError {
    pub fn hostname_resolution<T: Into<String>>(msg: T) -> Self {
        IpLocatorError::HostnameResolution(msg.into())
    }

    pub fn provider<T: Into<String>>(msg: T) -> Self {
        IpLocatorError::Provider(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        IpLocatorError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        IpLocatorError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        IpLocatorError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        IpLocatorError::Validation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for IpLocatorError {
    fn from(err: sea_orm::DbErr) -> Self {
        IpLocatorError::DatabaseOperation(err.to_string())
    }
}

impl From<url::ParseError> for IpLocatorError {
    fn from(err: url::ParseError) -> Self {
        IpLocatorError::HostnameResolution(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IpLocatorError>;
