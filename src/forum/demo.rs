//! Sample conversation the board starts with.

use crate::error::Result;
use crate::forum::tree::ReplyTree;

/// Adds the demo thread as a new root.
///
/// ```text
/// Jebediah7        Good afternoon
/// ├── Franklin24       Good afternoon indeed
/// │   └── Jebediah7        Indeed, for it is a good afternoon.
/// └── Shroomsbury616   I disagree about how good this afternoon is :/
///     └── Jebediah7        Then I am sorry to hear that, Shroomsbury616.
/// ```
pub fn seed_demo_thread(tree: &mut ReplyTree, now: u64) -> Result<()> {
    let root = tree.create_root("Jebediah7", "Good afternoon", now)?.path();

    let agree = tree
        .append_reply(&root, "Franklin24", "Good afternoon indeed", now)?
        .path();
    tree.append_reply(
        &agree,
        "Jebediah7",
        "Indeed, for it is a good afternoon.",
        now,
    )?;

    let disagree = tree
        .append_reply(
            &root,
            "Shroomsbury616",
            "I disagree about how good this afternoon is :/",
            now,
        )?
        .path();
    tree.append_reply(
        &disagree,
        "Jebediah7",
        "Then I am sorry to hear that, Shroomsbury616.",
        now,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forum::PostPath;

    #[test]
    fn test_demo_thread_layout() {
        let mut tree = ReplyTree::new();
        seed_demo_thread(&mut tree, 1_700_000_000_000).unwrap();

        let layout: Vec<(String, &str)> = tree
            .iter()
            .map(|(_, post)| (post.path().to_string(), post.author()))
            .collect();

        assert_eq!(
            layout,
            vec![
                ("0".to_string(), "Jebediah7"),
                ("0,0".to_string(), "Franklin24"),
                ("0,0,0".to_string(), "Jebediah7"),
                ("0,1".to_string(), "Shroomsbury616"),
                ("0,1,0".to_string(), "Jebediah7"),
            ]
        );
        assert_eq!(tree.resolve(&PostPath::root(0)).unwrap().reply_count(), 2);
    }

    #[test]
    fn test_seed_after_existing_threads() {
        let mut tree = ReplyTree::new();
        tree.create_root("a", "first", 0).unwrap();
        seed_demo_thread(&mut tree, 0).unwrap();

        assert_eq!(tree.len(), 2);
        let reply = tree.resolve(&PostPath::parse("1,1,0").unwrap()).unwrap();
        assert_eq!(reply.body(), "Then I am sorry to hear that, Shroomsbury616.");
    }
}
