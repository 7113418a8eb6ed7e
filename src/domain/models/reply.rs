/// Outcome of a request that reached the backend and returned a readable
/// body. Payloads carrying an `error` field become `Failed`.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply<T> {
    Success(T),
    Failed(String),
}

