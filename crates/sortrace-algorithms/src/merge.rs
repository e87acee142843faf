use sortrace_core::{Element, ExecutionContext, Pause, SortError, State};

enum Frame {
    Sort { left: usize, right: usize },
    Merge { left: usize, mid: usize, right: usize },
}

/// Top-down merge sort over the whole sequence.
pub async fn sort<C: ExecutionContext>(ctx: &mut C) -> Result<(), SortError> {
    let n = ctx.len();
    if n == 0 {
        return Ok(());
    }
    sort_range(ctx, 0, n - 1).await
}

/// Sort the inclusive range `left..=right`.
///
/// Runs on an explicit work stack in the same order as the recursive form:
/// left half, right half, then merge.
pub async fn sort_range<C: ExecutionContext>(
    ctx: &mut C,
    left: usize,
    right: usize,
) -> Result<(), SortError> {
    let whole = left == 0 && right + 1 == ctx.len();
    let mut stack = vec![Frame::Sort { left, right }];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Sort { left, right } => {
                if left >= right {
                    continue;
                }
                let mid = left + (right - left) / 2;
                stack.push(Frame::Merge { left, mid, right });
                stack.push(Frame::Sort { left: mid + 1, right });
                stack.push(Frame::Sort { left, right: mid });
            }
            Frame::Merge { left: l, mid, right: r } => {
                let last = whole && l == left && r == right;
                merge(ctx, l, mid, r, last).await?;
            }
        }
    }

    Ok(())
}

/// Stable merge of `left..=mid` and `mid+1..=right`. Left wins ties.
///
/// `last` marks the outermost merge, whose writes are final placements.
async fn merge<C: ExecutionContext>(
    ctx: &mut C,
    left: usize,
    mid: usize,
    right: usize,
    last: bool,
) -> Result<(), SortError> {
    let lower: Vec<Element> = (left..=mid).map(|i| ctx.element(i)).collect();
    let upper: Vec<Element> = (mid + 1..=right).map(|i| ctx.element(i)).collect();

    for k in left..=right {
        ctx.set_state(k, State::Comparing);
    }
    ctx.render();

    let (mut i, mut j, mut k) = (0, 0, left);

    while i < lower.len() && j < upper.len() {
        ctx.record_comparison();
        let next = if lower[i].value <= upper[j].value {
            i += 1;
            lower[i - 1]
        } else {
            j += 1;
            upper[j - 1]
        };

        ctx.write(k, Element { value: next.value, state: State::Swapping });
        ctx.record_swap();
        ctx.chime(next.value);
        ctx.render();
        if let Err(err) = ctx.suspend(Pause::Step).await {
            restore_unmerged(ctx, k + 1, &lower[i..], &upper[j..]);
            return Err(err);
        }

        ctx.set_state(k, State::Sorted);
        if last {
            ctx.report_progress(k - left + 1);
        }
        k += 1;
    }

    for rest in lower[i..].iter().chain(upper[j..].iter()) {
        ctx.write(k, Element { value: rest.value, state: State::Sorted });
        ctx.record_swap();
        k += 1;
    }
    if last {
        ctx.report_progress(k - left);
    }

    ctx.render();
    ctx.suspend(Pause::Step).await
}

/// Put the not yet merged elements back behind the merged prefix so a run
/// stopped mid-merge still holds exactly its input values.
fn restore_unmerged<C: ExecutionContext>(
    ctx: &mut C,
    from: usize,
    lower: &[Element],
    upper: &[Element],
) {
    for (k, rest) in (from..).zip(lower.iter().chain(upper.iter())) {
        ctx.write(k, Element { value: rest.value, state: State::Default });
    }
}
