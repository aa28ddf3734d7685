use crate::model::{Category, Course, CourseId, Level};

/// Static, ordered list of courses.
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    #[must_use]
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// The eight courses shipped with the demo.
    #[must_use]
    pub fn builtin() -> Self {
        use Category::{Business, Design, Programming, Science};
        use Level::{Advanced, Beginner, Intermediate};

        let rows = [
            (1, "Introduction to JavaScript", "Learn the fundamentals of JavaScript programming, from variables to functions and beyond.", Programming, Beginner, "6 weeks", "fab fa-js"),
            (2, "UI/UX Design Principles", "Master the art of user interface and user experience design with modern tools and techniques.", Design, Intermediate, "8 weeks", "fas fa-palette"),
            (3, "Digital Marketing Strategy", "Build effective digital marketing campaigns and grow your online presence.", Business, Beginner, "4 weeks", "fas fa-chart-line"),
            (4, "Data Science Fundamentals", "Explore the world of data science with Python and machine learning basics.", Science, Advanced, "12 weeks", "fas fa-database"),
            (5, "Python for Beginners", "Start your programming journey with Python, one of the most versatile languages.", Programming, Beginner, "6 weeks", "fab fa-python"),
            (6, "Graphic Design Mastery", "Learn professional graphic design techniques using industry-standard software.", Design, Intermediate, "10 weeks", "fas fa-pencil-ruler"),
            (7, "Business Analytics", "Use data to make informed business decisions and drive growth.", Business, Advanced, "8 weeks", "fas fa-analytics"),
            (8, "Environmental Science", "Understand the science behind climate change and environmental conservation.", Science, Intermediate, "6 weeks", "fas fa-leaf"),
        ];

        let courses = rows
            .into_iter()
            .map(|(id, title, description, category, level, duration, icon)| {
                Course::new(CourseId::new(id), title, description, category, level, duration, icon)
            })
            .collect();
        Self::new(courses)
    }

    /// All courses when `filter` is `None`, otherwise the matching subset.
    /// Definition order is preserved either way.
    #[must_use]
    pub fn list_courses(&self, filter: Option<Category>) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|c| filter.is_none_or(|wanted| c.category() == wanted))
            .collect()
    }

    /// Filter by a raw category name from the UI: `"all"` lists everything,
    /// an unrecognized name lists nothing.
    #[must_use]
    pub fn list_courses_named(&self, category: &str) -> Vec<&Course> {
        if category.trim().eq_ignore_ascii_case("all") {
            return self.list_courses(None);
        }
        match category.parse::<Category>() {
            Ok(category) => self.list_courses(Some(category)),
            Err(_) => Vec::new(),
        }
    }

    #[must_use]
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(courses: &[&Course]) -> Vec<u32> {
        courses.iter().map(|c| c.id().value()).collect()
    }

    #[test]
    fn unfiltered_listing_keeps_definition_order() {
        let catalog = Catalog::builtin();
        assert_eq!(ids(&catalog.list_courses(None)), [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn category_filter_returns_only_matches_in_order() {
        let catalog = Catalog::builtin();
        for category in Category::ALL {
            let listed = catalog.list_courses(Some(category));
            assert!(!listed.is_empty());
            assert!(listed.iter().all(|c| c.category() == category));
            let listed_ids = ids(&listed);
            let mut sorted = listed_ids.clone();
            sorted.sort_unstable();
            assert_eq!(listed_ids, sorted);
        }
        assert_eq!(ids(&catalog.list_courses(Some(Category::Design))), [2, 6]);
    }

    #[test]
    fn named_filter_handles_all_and_unknown() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.list_courses_named("all").len(), 8);
        assert_eq!(ids(&catalog.list_courses_named("Science")), [4, 8]);
        assert!(catalog.list_courses_named("cooking").is_empty());
    }

    #[test]
    fn course_lookup_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.course(CourseId::new(5)).unwrap().title(), "Python for Beginners");
        assert!(catalog.course(CourseId::new(99)).is_none());
    }
}
