// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Page slicing for list endpoints.

use crate::models::Paginator;

/// Cut one page out of `items`.
///
/// Pages are 1-based. A page of `0` is read as the first page and a
/// `per_page` of `0` as one item per page. Asking for a page past the end
/// yields an empty page that still reports the real `total`.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Paginator<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total = items.len();
    let last_page = total.div_ceil(per_page).max(1);

    let start = (page - 1).saturating_mul(per_page);
    let data: Vec<T> = items.into_iter().skip(start).take(per_page).collect();

    let (from, to) = if data.is_empty() {
        (None, None)
    } else {
        (Some(start + 1), Some(start + data.len()))
    };

    Paginator {
        data,
        total,
        from,
        to,
        current_page: page,
        last_page,
    }
}
