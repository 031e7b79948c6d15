//! Сводная статистика по набору блогов.
//!
//! Все функции чистые и определены для любого входа, включая пустой.
//! При равенстве значений побеждает первый встреченный элемент
//! (для авторов — автор, встретившийся во входе раньше).

use std::collections::HashMap;

use super::blog::Blog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FavoriteBlog {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AuthorBlogs {
    pub(crate) author: String,
    pub(crate) blogs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AuthorLikes {
    pub(crate) author: String,
    pub(crate) likes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BlogStats {
    pub(crate) total_blogs: usize,
    pub(crate) total_likes: i64,
    pub(crate) favorite_blog: Option<FavoriteBlog>,
    pub(crate) most_blogs: Option<AuthorBlogs>,
    pub(crate) most_likes: Option<AuthorLikes>,
}

pub(crate) fn total_likes(blogs: &[Blog]) -> i64 {
    blogs
        .iter()
        .fold(0_i64, |total, blog| total.saturating_add(blog.likes))
}

pub(crate) fn favorite_blog(blogs: &[Blog]) -> Option<FavoriteBlog> {
    let mut favorite = blogs.first()?;
    for blog in &blogs[1..] {
        if blog.likes > favorite.likes {
            favorite = blog;
        }
    }

    Some(FavoriteBlog {
        title: favorite.title.clone(),
        author: favorite.author.clone(),
        likes: favorite.likes,
    })
}

pub(crate) fn most_blogs(blogs: &[Blog]) -> Option<AuthorBlogs> {
    let counts = group_by_author(blogs, |_| 1_usize, usize::saturating_add);
    let (author, blogs) = leftmost_max(counts)?;
    Some(AuthorBlogs {
        author: author.to_string(),
        blogs,
    })
}

pub(crate) fn most_likes(blogs: &[Blog]) -> Option<AuthorLikes> {
    let sums = group_by_author(blogs, |blog| blog.likes, i64::saturating_add);
    let (author, likes) = leftmost_max(sums)?;
    Some(AuthorLikes {
        author: author.to_string(),
        likes,
    })
}

pub(crate) fn blog_stats(blogs: &[Blog]) -> BlogStats {
    BlogStats {
        total_blogs: blogs.len(),
        total_likes: total_likes(blogs),
        favorite_blog: favorite_blog(blogs),
        most_blogs: most_blogs(blogs),
        most_likes: most_likes(blogs),
    }
}

/// Суммирует `value` по авторам за один проход, сохраняя порядок первого появления автора.
/// `add` должен быть насыщающим: суммы не переполняются.
fn group_by_author<'a, T, F>(
    blogs: &'a [Blog],
    value: F,
    add: fn(T, T) -> T,
) -> Vec<(&'a str, T)>
where
    T: Copy,
    F: Fn(&Blog) -> T,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, T)> = Vec::new();

    for blog in blogs {
        let author = blog.author.as_str();
        match index.get(author) {
            Some(&position) => groups[position].1 = add(groups[position].1, value(blog)),
            None => {
                index.insert(author, groups.len());
                groups.push((author, value(blog)));
            }
        }
    }

    groups
}

fn leftmost_max<T: PartialOrd>(groups: Vec<(&str, T)>) -> Option<(&str, T)> {
    let mut best: Option<(&str, T)> = None;
    for (author, value) in groups {
        let replace = match &best {
            Some((_, best_value)) => value > *best_value,
            None => true,
        };
        if replace {
            best = Some((author, value));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::{
        AuthorBlogs, AuthorLikes, FavoriteBlog, blog_stats, favorite_blog, most_blogs,
        most_likes, total_likes,
    };
    use crate::domain::blog::Blog;

    #[test]
    fn total_likes_of_empty_list_is_zero() {
        assert_eq!(total_likes(&[]), 0);
    }

    #[test]
    fn total_likes_of_single_blog_equals_its_likes() {
        let blogs = vec![blog(1, "Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5)];
        assert_eq!(total_likes(&blogs), 5);
    }

    #[test]
    fn total_likes_of_sample_list() {
        assert_eq!(total_likes(&sample_blogs()), 36);
    }

    #[test]
    fn total_likes_does_not_depend_on_order() {
        let mut blogs = sample_blogs();
        blogs.reverse();
        assert_eq!(total_likes(&blogs), 36);
    }

    #[test]
    fn favorite_blog_of_empty_list_is_none() {
        assert_eq!(favorite_blog(&[]), None);
    }

    #[test]
    fn favorite_blog_of_sample_list() {
        assert_eq!(
            favorite_blog(&sample_blogs()),
            Some(FavoriteBlog {
                title: "Canonical string reduction".to_string(),
                author: "Edsger W. Dijkstra".to_string(),
                likes: 12,
            })
        );
    }

    #[test]
    fn favorite_blog_prefers_first_on_tie() {
        let blogs = vec![
            blog(1, "first", "A", 3),
            blog(2, "second", "B", 7),
            blog(3, "third", "C", 7),
        ];
        let favorite = favorite_blog(&blogs).expect("list is not empty");
        assert_eq!(favorite.title, "second");
    }

    #[test]
    fn most_blogs_of_empty_list_is_none() {
        assert_eq!(most_blogs(&[]), None);
    }

    #[test]
    fn most_blogs_of_sample_list() {
        assert_eq!(
            most_blogs(&sample_blogs()),
            Some(AuthorBlogs {
                author: "Robert C. Martin".to_string(),
                blogs: 3,
            })
        );
    }

    #[test]
    fn most_blogs_prefers_first_seen_author_on_tie() {
        let blogs = vec![
            blog(1, "a", "Later Winner", 1),
            blog(2, "b", "Early Bird", 1),
            blog(3, "c", "Later Winner", 1),
            blog(4, "d", "Early Bird", 1),
        ];
        let result = most_blogs(&blogs).expect("list is not empty");
        assert_eq!(result.author, "Later Winner");
        assert_eq!(result.blogs, 2);
    }

    #[test]
    fn most_likes_of_empty_list_is_none() {
        assert_eq!(most_likes(&[]), None);
    }

    #[test]
    fn most_likes_of_sample_list() {
        assert_eq!(
            most_likes(&sample_blogs()),
            Some(AuthorLikes {
                author: "Edsger W. Dijkstra".to_string(),
                likes: 17,
            })
        );
    }

    #[test]
    fn most_likes_prefers_first_seen_author_on_tie() {
        let blogs = vec![
            blog(1, "a", "B", 4),
            blog(2, "b", "A", 10),
            blog(3, "c", "B", 6),
        ];
        let result = most_likes(&blogs).expect("list is not empty");
        assert_eq!(result.author, "B");
        assert_eq!(result.likes, 10);
    }

    #[test]
    fn blog_stats_of_empty_list() {
        let stats = blog_stats(&[]);
        assert_eq!(stats.total_blogs, 0);
        assert_eq!(stats.total_likes, 0);
        assert!(stats.favorite_blog.is_none());
        assert!(stats.most_blogs.is_none());
        assert!(stats.most_likes.is_none());
    }

    #[test]
    fn blog_stats_combines_all_aggregates() {
        let stats = blog_stats(&sample_blogs());
        assert_eq!(stats.total_blogs, 6);
        assert_eq!(stats.total_likes, 36);
        assert_eq!(stats.favorite_blog.map(|f| f.likes), Some(12));
        assert_eq!(stats.most_blogs.map(|m| m.blogs), Some(3));
        assert_eq!(stats.most_likes.map(|m| m.likes), Some(17));
    }

    #[test]
    fn huge_like_counts_saturate_instead_of_overflowing() {
        let blogs = vec![
            unchecked_blog(1, "Type wars", "Robert C. Martin", i64::MAX),
            unchecked_blog(2, "First class tests", "Robert C. Martin", i64::MAX - 1),
            unchecked_blog(3, "React patterns", "Michael Chan", 1),
        ];

        let stats = blog_stats(&blogs);
        assert_eq!(stats.total_likes, i64::MAX);
        assert_eq!(stats.favorite_blog.map(|f| f.likes), Some(i64::MAX));
        assert_eq!(
            stats.most_likes,
            Some(AuthorLikes {
                author: "Robert C. Martin".to_string(),
                likes: i64::MAX,
            })
        );
    }

    fn blog(id: i64, title: &str, author: &str, likes: i64) -> Blog {
        Blog::new(id, title, author, None, likes, 1).expect("sample blog must be valid")
    }

    fn sample_blogs() -> Vec<Blog> {
        vec![
            blog(1, "React patterns", "Michael Chan", 7),
            blog(2, "Go To Statement Considered Harmful", "Edsger W. Dijkstra", 5),
            blog(3, "Canonical string reduction", "Edsger W. Dijkstra", 12),
            blog(4, "First class tests", "Robert C. Martin", 10),
            blog(5, "TDD harms architecture", "Robert C. Martin", 0),
            blog(6, "Type wars", "Robert C. Martin", 2),
        ]
    }

    // Обходит валидацию `Blog::new`, чтобы проверить агрегацию на значениях у границы i64.
    fn unchecked_blog(id: i64, title: &str, author: &str, likes: i64) -> Blog {
        Blog {
            id,
            title: title.to_string(),
            author: author.to_string(),
            url: None,
            likes,
            owner_id: 1,
        }
    }
}
