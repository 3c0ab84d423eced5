// File: src/services/users.rs
// Purpose: flat-file user persistence for the reference application

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use solidus::ErrorKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Incoming user payload; the store assigns the id.
#[derive(Debug, Deserialize)]
pub struct UserDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Store failures, tagged by category. Callers match on the variant, never
/// on message text.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("user store io failure: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for solidus::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => solidus::Error::domain(ErrorKind::NotFound, "user not found"),
            StoreError::Validation(message) => {
                solidus::Error::domain(ErrorKind::Validation, message)
            }
            StoreError::Io(_) => solidus::Error::domain(ErrorKind::Internal, "user store unavailable"),
        }
    }
}

// Every request opens its own UserStore; the file itself is the shared
// state, so one process-wide lock serializes load/mutate/save cycles.
static STORE_LOCK: Mutex<()> = Mutex::new(());

fn store_lock() -> MutexGuard<'static, ()> {
    STORE_LOCK.lock().expect("user store lock poisoned")
}

/// Line-oriented user store: one `id|name|email|phone` record per line.
/// Malformed lines are skipped on load.
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store location used by the route handlers, relative to the working
    /// directory like the routes tree itself.
    pub fn open_default() -> Self {
        Self::new("data/users.txt")
    }

    pub fn list(&self) -> Result<Vec<User>, StoreError> {
        let _guard = store_lock();
        self.load()
    }

    pub fn find(&self, id: i64) -> Result<User, StoreError> {
        let _guard = store_lock();
        self.load()?
            .into_iter()
            .find(|user| user.id == id)
            .ok_or(StoreError::NotFound)
    }

    pub fn create(&self, draft: UserDraft) -> Result<User, StoreError> {
        validate(&draft)?;

        let _guard = store_lock();
        let mut users = self.load()?;
        let id = users.iter().map(|user| user.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
        };
        users.push(user.clone());
        self.save(&users)?;
        Ok(user)
    }

    pub fn update(&self, id: i64, draft: UserDraft) -> Result<User, StoreError> {
        validate(&draft)?;

        let _guard = store_lock();
        let mut users = self.load()?;
        let user = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(StoreError::NotFound)?;
        user.name = draft.name;
        user.email = draft.email;
        user.phone = draft.phone;
        let updated = user.clone();

        self.save(&users)?;
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let _guard = store_lock();
        let mut users = self.load()?;
        let before = users.len();
        users.retain(|user| user.id != id);
        if users.len() == before {
            return Err(StoreError::NotFound);
        }
        self.save(&users)
    }

    fn load(&self) -> Result<Vec<User>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            // A store that was never written is just empty.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(content.lines().filter_map(parse_line).collect())
    }

    fn save(&self, users: &[User]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let mut out = String::new();
        for user in users {
            out.push_str(&format!(
                "{}|{}|{}|{}\n",
                user.id, user.name, user.email, user.phone
            ));
        }
        fs::write(&self.path, out)?;
        Ok(())
    }
}

fn validate(draft: &UserDraft) -> Result<(), StoreError> {
    if draft.name.trim().is_empty() {
        return Err(StoreError::Validation("name is required".to_string()));
    }
    if draft.email.trim().is_empty() {
        return Err(StoreError::Validation("email is required".to_string()));
    }
    if !draft.email.contains('@') {
        return Err(StoreError::Validation("invalid email address".to_string()));
    }
    Ok(())
}

/// Parses one record; anything that is not exactly four `|` fields with a
/// numeric id is dropped.
fn parse_line(line: &str) -> Option<User> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut parts = line.split('|');
    let id = parts.next()?.trim().parse().ok()?;
    let name = parts.next()?.trim().to_string();
    let email = parts.next()?.trim().to_string();
    let phone = parts.next()?.trim().to_string();
    if parts.next().is_some() {
        return None;
    }

    Some(User {
        id,
        name,
        email,
        phone,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn draft(name: &str, email: &str, phone: &str) -> UserDraft {
        UserDraft {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }

    fn temp_store(dir: &tempfile::TempDir) -> UserStore {
        UserStore::new(dir.path().join("users.txt"))
    }

    #[test]
    fn test_missing_file_is_an_empty_store() {
        let dir = tempdir().unwrap();
        let store = temp_store(&dir);
        assert_eq!(store.list().unwrap(), Vec::<User>::new());
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let dir = tempdir().unwrap();
        let store = temp_store(&dir);

        let ana = store.create(draft("Ana", "ana@example.com", "111")).unwrap();
        let rui = store.create(draft("Rui", "rui@example.com", "")).unwrap();
        assert_eq!(ana.id, 1);
        assert_eq!(rui.id, 2);

        let users = store.list().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Ana");
    }

    #[test]
    fn test_find_and_update_round_trip() {
        let dir = tempdir().unwrap();
        let store = temp_store(&dir);
        let ana = store.create(draft("Ana", "ana@example.com", "111")).unwrap();

        let updated = store
            .update(ana.id, draft("Ana Maria", "ana@example.com", "222"))
            .unwrap();
        assert_eq!(updated.phone, "222");
        assert_eq!(store.find(ana.id).unwrap(), updated);
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let dir = tempdir().unwrap();
        let store = temp_store(&dir);
        let err = store
            .update(99, draft("Ana", "ana@example.com", ""))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn test_delete_removes_the_record() {
        let dir = tempdir().unwrap();
        let store = temp_store(&dir);
        let ana = store.create(draft("Ana", "ana@example.com", "")).unwrap();

        store.delete(ana.id).unwrap();
        assert!(matches!(store.find(ana.id).unwrap_err(), StoreError::NotFound));
        assert!(matches!(store.delete(ana.id).unwrap_err(), StoreError::NotFound));
    }

    #[test]
    fn test_validation_rules() {
        let dir = tempdir().unwrap();
        let store = temp_store(&dir);

        let err = store.create(draft("", "ana@example.com", "")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = store.create(draft("Ana", "", "")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = store.create(draft("Ana", "not-an-email", "")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.txt");
        fs::write(
            &path,
            "1|Ana|ana@example.com|111\nnot a record\n2|Rui|rui@example.com\n\n3|Eva|eva@example.com|333\n",
        )
        .unwrap();

        let store = UserStore::new(&path);
        let users = store.list().unwrap();
        let ids: Vec<i64> = users.iter().map(|user| user.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_ids_continue_after_the_highest_survivor() {
        let dir = tempdir().unwrap();
        let store = temp_store(&dir);
        store.create(draft("Ana", "ana@example.com", "")).unwrap();
        let rui = store.create(draft("Rui", "rui@example.com", "")).unwrap();
        store.delete(1).unwrap();

        let eva = store.create(draft("Eva", "eva@example.com", "")).unwrap();
        assert_eq!(eva.id, rui.id + 1);
    }
}
