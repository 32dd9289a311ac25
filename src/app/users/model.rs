//! 用户数据模型

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::AppError;

/// 已存储的用户记录
///
/// `id` 是存储分配的记录标识符（URL 路径中使用），`user_id` 是调用方提供的业务 `ID`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "ID")]
    pub user_id: i64,
    pub email: String,
    pub username: Option<String>,
}

/// 新增与更新共用的请求体
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserPayload {
    #[serde(rename = "ID", default, deserialize_with = "optional_integer")]
    #[validate(required(message = "ID is required"))]
    pub user_id: Option<i64>,

    #[serde(default, deserialize_with = "optional_string")]
    #[validate(
        required(message = "email is required"),
        length(min = 1, message = "email is required")
    )]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "optional_string")]
    pub username: Option<String>,
}

/// 通过校验、可以写入存储的用户字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_id: i64,
    pub email: String,
    pub username: Option<String>,
}

impl NewUser {
    pub fn new(user_id: i64, email: impl Into<String>, username: Option<&str>) -> Self {
        Self {
            user_id,
            email: email.into(),
            username: username.map(str::to_string),
        }
    }

    pub(crate) fn into_user(self, id: Uuid) -> User {
        User {
            id,
            user_id: self.user_id,
            email: self.email,
            username: self.username,
        }
    }
}

impl TryFrom<UserPayload> for NewUser {
    type Error = AppError;

    fn try_from(payload: UserPayload) -> Result<Self, Self::Error> {
        payload.validate()?;

        let (Some(user_id), Some(email)) = (payload.user_id, payload.email) else {
            return Err(AppError::Validation(
                "User validation failed: ID and email are required".to_string(),
            ));
        };

        Ok(Self {
            user_id,
            email,
            username: payload.username,
        })
    }
}

/// 解析 URL 路径中的记录标识符
pub fn parse_record_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        AppError::Validation(format!("invalid record identifier \"{}\"", raw))
    })
}

/// 把 JSON 值转换为整数：接受整数、没有小数部分的浮点数、数字字符串和布尔值
///
/// 空字符串视为未提供。业务 `ID` 按整数存储，带小数的值会被拒绝。
pub fn coerce_integer(value: &Value) -> Result<Option<i64>, String> {
    let cast_failed = || format!("Cast to Number failed for value {}", value);

    match value {
        Value::Null => Ok(None),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Some(i)),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| Some(f as i64))
                .ok_or_else(cast_failed),
        },
        Value::Bool(b) => Ok(Some(i64::from(*b))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s.trim().parse().map(Some).map_err(|_| cast_failed()),
        _ => Err(cast_failed()),
    }
}

/// 把 JSON 值转换为字符串：数字和布尔值取其文本形式
pub fn coerce_string(value: &Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(format!("Cast to string failed for value {}", other)),
    }
}

fn optional_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_integer(&value).map_err(de::Error::custom)
}

fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_string(&value).map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(body: Value) -> UserPayload {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_user_wire_format() {
        let id = Uuid::new_v4();
        let user = NewUser::new(1, "a@x.com", Some("a")).into_user(id);

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            json!({ "_id": id.to_string(), "ID": 1, "email": "a@x.com", "username": "a" })
        );
    }

    #[test]
    fn test_id_coercion() {
        assert_eq!(coerce_integer(&json!(5)), Ok(Some(5)));
        assert_eq!(coerce_integer(&json!(" 42 ")), Ok(Some(42)));
        assert_eq!(coerce_integer(&json!(3.0)), Ok(Some(3)));
        assert_eq!(coerce_integer(&json!("")), Ok(None));
        assert_eq!(coerce_integer(&json!(true)), Ok(Some(1)));
        assert_eq!(coerce_integer(&json!(false)), Ok(Some(0)));
        assert!(coerce_integer(&json!(1.5)).is_err());
        assert!(coerce_integer(&json!("abc")).is_err());
        assert!(coerce_integer(&json!([1])).is_err());
    }

    #[test]
    fn test_string_coercion() {
        assert_eq!(coerce_string(&json!(12)), Ok(Some("12".to_string())));
        assert_eq!(coerce_string(&json!(true)), Ok(Some("true".to_string())));
        assert!(coerce_string(&json!({ "a": 1 })).is_err());
    }

    #[test]
    fn test_payload_into_new_user() {
        let new_user = NewUser::try_from(payload(json!({
            "ID": "7",
            "email": "g@x.com",
            "extra": "ignored"
        })))
        .unwrap();

        assert_eq!(new_user, NewUser::new(7, "g@x.com", None));
    }

    #[test]
    fn test_missing_required_fields() {
        let err = NewUser::try_from(payload(json!({ "username": "nobody" }))).unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(
                    msg,
                    "User validation failed: ID is required, email is required"
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_email_rejected() {
        let result = NewUser::try_from(payload(json!({ "ID": 1, "email": "" })));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_uncoercible_id_rejected() {
        let result =
            serde_json::from_value::<UserPayload>(json!({ "ID": "one", "email": "a@x.com" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_record_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_record_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_record_id("abc"), Err(AppError::Validation(_))));
    }
}
