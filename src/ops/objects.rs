use std::rc::Rc;

use crate::error::Result;
use crate::hash::{hash_object, Hash};
use crate::object::{Blob, ObjectType, RepoObject};
use crate::repo::Repo;

/// compute an object's id and write it into the object store.
///
/// the hash is computed over the object's serialized form, assigned to
/// the object, and the object inserted. insertion is idempotent: a repo
/// that already holds this hash keeps its existing instance.
pub fn hash_object_write(repo: &mut Repo, mut object: RepoObject) -> Result<Hash> {
    let bytes = object.encode()?;
    let hash = hash_object(object.object_type(), &bytes);
    object.set_hash(hash.clone());
    repo.database.objects.put(Rc::new(object));
    Ok(hash)
}

/// decode serialized object content of the given type, then hash and
/// write the object
pub fn hash_object_write_bytes(
    repo: &mut Repo,
    object_type: ObjectType,
    payload: &[u8],
) -> Result<Hash> {
    let object = RepoObject::decode(object_type, payload)?;
    hash_object_write(repo, object)
}

/// hash and write a blob with the given payload
pub fn hash_object_write_blob(repo: &mut Repo, bytes: impl Into<Rc<[u8]>>) -> Result<Hash> {
    hash_object_write(repo, RepoObject::Blob(Blob::new(bytes)))
}

/// hash and write a blob holding the UTF-8 bytes of the given text
pub fn hash_object_write_string(repo: &mut Repo, text: &str) -> Result<Hash> {
    hash_object_write_blob(repo, text.as_bytes().to_vec())
}

/// fetch the object with the given hash
pub fn cat_file(repo: &Repo, hash_value: &str) -> Option<Rc<RepoObject>> {
    repo.database.objects.get(hash_value).cloned()
}

/// the type of the object with the given hash
pub fn cat_file_type(repo: &Repo, hash_value: &str) -> Option<ObjectType> {
    repo.database.objects.get(hash_value).map(|o| o.object_type())
}
