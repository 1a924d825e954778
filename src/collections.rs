use std::{collections::HashMap, fmt::Debug, hash::Hash, path::Path};

///
/// A tree of entries keyed by relative file path, one level per
/// path component
///
pub struct PathTree<T> {
    dirs: HashMap<String, PathTree<T>>,
    entries: HashMap<String, T>,
}

impl<T> Debug for PathTree<T> where T : Debug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathTree").field("dirs", &self.dirs).field("entries", &self.entries).finish()
    }
}

impl<T> PathTree<T> {
    ///
    /// Creates a new, empty PathTree
    ///
    pub fn new() -> Self {
        Self { dirs: HashMap::new(), entries: HashMap::new() }
    }

    ///
    /// Inserts the provided entry into the `PathTree` under the given
    /// relative path. Returns the previous entry at that path, if any.
    ///
    pub fn insert(&mut self, path: &Path, entr: T) -> Option<T> {
        let mut comps: Vec<String> = path.iter()
            .map(|c| c.to_string_lossy().into_owned()).collect();
        let leaf = comps.pop()?;

        let mut node = self;
        for comp in comps {
            node = node.dirs.entry(comp).or_insert_with(PathTree::new);
        }
        node.entries.insert(leaf, entr)
    }
    ///
    /// Gets the value of the entry found at the given relative path
    ///
    pub fn get(&self, path: &Path) -> Option<&T> {
        let mut node = self;
        let mut comps = path.iter().peekable();
        while let Some(comp) = comps.next() {
            let key = comp.to_string_lossy();
            if comps.peek().is_none() {
                return node.entries.get(key.as_ref());
            }
            node = match node.dirs.get(key.as_ref()) {
                Some(sub) => sub,
                None => return None
            };
        }
        None
    }
}

pub trait GroupBy<K : Eq + Hash, I> : IntoIterator<Item = I> {
    fn group_by(
        self,
        whr: impl Fn(&I) -> K
    ) -> HashMap<K, Vec<I>> where Self: Sized {
        let mut map = HashMap::<K, Vec<I>>::new();
        for item in self {
            let key = whr(&item);
            if let Some(list) = map.get_mut(&key) {
                list.push(item);
            } else {
                let mut list = Vec::new();
                list.push(item);
                map.insert(key, list);
            }
        }

        map
    }
}

impl<T, K : Eq + Hash, I> GroupBy<K, I> for T where T : IntoIterator<Item = I> { }

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{GroupBy, PathTree};

    #[test]
    fn test_path_tree_insert() {
        let mut tree = PathTree::new();
        tree.insert(Path::new("hr_20240115/001/MR0001"), "first");
        tree.insert(Path::new("hr_20240115/001/MR0002"), "second");
        tree.insert(Path::new("hr_20240115/MR0001"), "shallower");

        assert_eq!(tree.entries.len(), 0);
        assert_eq!(tree.dirs.len(), 1);
        assert_eq!(tree.dirs["hr_20240115"].entries.len(), 1);
        assert_eq!(tree.dirs["hr_20240115"].entries["MR0001"], "shallower");
        assert_eq!(tree.dirs["hr_20240115"].dirs["001"].entries.len(), 2);
        assert_eq!(tree.dirs["hr_20240115"].dirs["001"].entries["MR0001"], "first");
        assert_eq!(tree.dirs["hr_20240115"].dirs["001"].entries["MR0002"], "second");
    }

    #[test]
    fn test_path_tree_insert_returns_previous_entry() {
        let mut tree = PathTree::new();
        assert_eq!(tree.insert(Path::new("scan/MR0001"), 1), None);
        assert_eq!(tree.insert(Path::new("scan/MR0001"), 2), Some(1));
        assert_eq!(tree.get(Path::new("scan/MR0001")), Some(&2));
    }

    #[test]
    fn test_path_tree_get() {
        let mut tree = PathTree::new();
        tree.insert(Path::new("prisma_20240309/3d_dicom/MR0001"), "a scan".to_string());
        tree.insert(Path::new("prisma_20240309/3d_dicom/MR0002"), "another scan".to_string());

        assert_eq!(tree.get(Path::new("prisma_20240309/3d_dicom/MR0001")), Some(&"a scan".to_string()));
        assert_eq!(tree.get(Path::new("prisma_20240309/3d_dicom/MR0002")), Some(&"another scan".to_string()));
        assert_eq!(tree.get(Path::new("prisma_20240309/3d_dicom/MR0003")), None);
        assert_eq!(tree.get(Path::new("prisma_20240309/MR0001")), None);
    }

    #[test]
    fn test_group_by() {
        let grouped = vec!["MR0001", "SR0001", "MR0002"].group_by(|s| s.as_bytes()[0]);
        assert_eq!(grouped[&b'M'], vec!["MR0001", "MR0002"]);
        assert_eq!(grouped[&b'S'], vec!["SR0001"]);
    }
}
