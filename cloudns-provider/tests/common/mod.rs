//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use cloudns_provider::{Apiaccess, ClouDnsClient, Record, RecordType};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 跳过测试的宏（当 `CLOUDNS_AUTH_ID` 与 `CLOUDNS_SUB_AUTH_ID` 均缺失时）
#[macro_export]
macro_rules! skip_if_no_account_id {
    () => {
        if std::env::var("CLOUDNS_AUTH_ID").is_err()
            && std::env::var("CLOUDNS_SUB_AUTH_ID").is_err()
        {
            eprintln!("跳过测试: 缺少环境变量 CLOUDNS_AUTH_ID 或 CLOUDNS_SUB_AUTH_ID");
            return;
        }
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 生成 SRV 记录专用的测试名称（格式：_service._tcp）
pub fn generate_srv_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}._tcp", &uuid.to_string()[..8])
}

/// 获取测试记录（创建和更新）
pub fn get_test_records(domain: &str, host: &str, record_type: RecordType) -> (Record, Record) {
    let base = |value: &str| Record::new(domain, host, record_type.clone(), value, 3600);
    match &record_type {
        RecordType::A => (base("192.0.2.1"), base("192.0.2.2")),
        RecordType::Aaaa => (base("2001:db8::1"), base("2001:db8::2")),
        RecordType::Cname => (base("target1.example.com"), base("target2.example.com")),
        RecordType::Mx => (
            Record {
                priority: 10,
                ..base("mail1.example.com")
            },
            Record {
                priority: 20,
                ..base("mail2.example.com")
            },
        ),
        RecordType::Srv => (
            Record {
                priority: 0,
                weight: 5,
                port: 443,
                ..base("srv1.example.com")
            },
            Record {
                priority: 10,
                weight: 10,
                port: 8443,
                ..base("srv2.example.com")
            },
        ),
        RecordType::Caa => (
            Record {
                caa_flag: "0".to_string(),
                caa_type: "issue".to_string(),
                caa_value: "letsencrypt.org".to_string(),
                ..base("")
            },
            Record {
                caa_flag: "0".to_string(),
                caa_type: "issue".to_string(),
                caa_value: "digicert.com".to_string(),
                ..base("")
            },
        ),
        _ => (base("test-value-1"), base("test-value-2")),
    }
}

/// 测试上下文 - 封装客户端、凭证和测试域名
pub struct TestContext {
    pub client: ClouDnsClient,
    pub auth: Apiaccess,
    pub domain: String,
}

impl TestContext {
    /// 从环境变量创建测试上下文
    ///
    /// `CLOUDNS_AUTH_ID` 与 `CLOUDNS_SUB_AUTH_ID` 二选一。
    pub fn from_env() -> Option<Self> {
        let password = env::var("CLOUDNS_AUTH_PASSWORD").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let auth = match env::var("CLOUDNS_SUB_AUTH_ID") {
            Ok(sub_id) => Apiaccess::sub_user(sub_id.parse().ok()?, password),
            Err(_) => Apiaccess::new(env::var("CLOUDNS_AUTH_ID").ok()?.parse().ok()?, password),
        };
        let client = ClouDnsClient::new().ok()?;

        Some(Self {
            client,
            auth,
            domain,
        })
    }

    /// 创建测试记录并返回创建的记录
    pub async fn create_test_record(&self) -> Option<Record> {
        let record = Record::new(
            &self.domain,
            generate_test_record_name(),
            RecordType::Txt,
            "integration-test",
            3600,
        );
        self.client.create_record(&self.auth, &record).await.ok()
    }

    /// 清理测试记录
    pub async fn cleanup_record(&self, record: &Record) {
        let _ = self.client.destroy_record(&self.auth, record).await;
    }

    /// 查找并清理所有测试记录（以 _test- 开头的记录）
    pub async fn cleanup_all_test_records(&self) {
        if let Ok(records) = self.client.list_records(&self.auth, &self.domain).await {
            for record in records {
                if record.host.starts_with("_test-") {
                    let _ = self.client.destroy_record(&self.auth, &record).await;
                }
            }
        }
    }
}
