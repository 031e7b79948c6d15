use super::error::DomainError;

/// Разрешает операцию, только если запрос выполняет владелец ресурса.
///
/// Без пользователя в запросе возвращает `Unauthorized`, при чужом ресурсе `Forbidden`.
pub(crate) fn authorize_owner_or_fail(
    resource_owner_id: i64,
    request_user_id: Option<i64>,
) -> Result<(), DomainError> {
    match request_user_id {
        None => Err(DomainError::Unauthorized),
        Some(user_id) if user_id != resource_owner_id => Err(DomainError::Forbidden),
        Some(_) => Ok(()),
    }
}
