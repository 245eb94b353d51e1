use crate::runtime::discovery::ListedObject;

/// Lists every object in a bucket, following pagination to the end.
pub trait ObjectLister {
    fn list_objects(&self, bucket: &str) -> Result<Vec<ListedObject>, String>;
}
