//! Collision detection between the player and falling entities
//!
//! Everything on screen is an axis-aligned box and there are only ever a
//! few dozen live obstacles, so a linear scan is all we need.

use super::rect::Rect;

/// True if any obstacle box overlaps the player box with positive area
pub fn check<I>(player_box: &Rect, obstacle_boxes: I) -> bool
where
    I: IntoIterator<Item = Rect>,
{
    first_hit(player_box, obstacle_boxes).is_some()
}

/// Index of the first overlapping box, in iteration order
pub fn first_hit<I>(player_box: &Rect, boxes: I) -> Option<usize>
where
    I: IntoIterator<Item = Rect>,
{
    boxes.into_iter().position(|b| player_box.intersects(&b))
}

/// Area shared by two boxes (zero when they only touch or are apart)
pub fn overlap_area(a: &Rect, b: &Rect) -> f32 {
    a.intersection(b).map(|r| r.area()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_empty_is_false() {
        let player = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!check(&player, std::iter::empty()));
    }

    #[test]
    fn test_check_finds_any_overlap() {
        let player = Rect::new(100.0, 700.0, 50.0, 50.0);
        let boxes = vec![
            Rect::new(0.0, 0.0, 50.0, 50.0),
            Rect::new(300.0, 690.0, 50.0, 50.0),
            Rect::new(140.0, 660.0, 50.0, 50.0),
        ];
        assert!(check(&player, boxes.clone()));
        assert_eq!(first_hit(&player, boxes), Some(2));
    }

    #[test]
    fn test_touching_is_not_a_hit() {
        let player = Rect::new(100.0, 700.0, 50.0, 50.0);
        // Directly above, bottom edge on the player's top edge
        let above = Rect::new(100.0, 650.0, 50.0, 50.0);
        // Directly right, left edge on the player's right edge
        let beside = Rect::new(150.0, 700.0, 50.0, 50.0);
        assert!(!check(&player, [above, beside]));
        assert_eq!(overlap_area(&player, &above), 0.0);
    }

    #[test]
    fn test_overlap_area() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(overlap_area(&a, &b), 25.0);
        assert_eq!(overlap_area(&b, &a), 25.0);
    }
}
