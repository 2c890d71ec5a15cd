use serde::Serialize;

/// 表单校验失败时收集到的全部提示, 按规则顺序排列
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .0.join("\n"))]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new(messages: Vec<String>) -> Self {
        Self(messages)
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

/// 自定义错误类型
#[derive(thiserror::Error, Debug)]
pub enum RosterError {
    /// 表格中不存在的列
    #[error("Cannot sort by column {0}.")]
    UnknownColumn(String),
    /// 筛选表单中不存在的字段
    #[error("Cannot filter by field {0}.")]
    UnknownCriterion(String),
    /// 筛选条件的值类型不受支持
    #[error("Type '{0}' is not supported.")]
    UnsupportedCriterionType(String),
    /// 配置项取值非法
    #[error("invalid configuration: {0}")]
    Config(String),
    /// 文件读写失败
    #[error("failed to access file: {0}")]
    Io(#[from] std::io::Error),
    /// .env 文件解析失败
    #[error("failed to read .env file: {0}")]
    Env(#[from] dotenv::Error),
    /// 日志初始化失败
    #[error("failed to set up logging: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl RosterError {
    /// Usage errors are shown to the user as an alert and never touch the roster.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            RosterError::UnknownColumn(_)
                | RosterError::UnknownCriterion(_)
                | RosterError::UnsupportedCriterionType(_)
        )
    }
}

// the webview only needs the message
impl Serialize for RosterError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type RosterResult<T> = Result<T, RosterError>;
