//! Browser side of the behavior contract.
//!
//! `DbReport.activate(root)` attaches sort, filter and relative time to one
//! rendered document. It is called once from the window `load` event, so
//! every declared stylesheet and script has loaded first. Activating the
//! same root twice is a no-op.

/// Inline activation script embedded after all declared assets.
pub const ACTIVATION_SCRIPT: &str = r#"(function (global) {
    'use strict';

    var activated = new WeakSet();

    function relativeTime(then, now) {
        var distance = now - then;
        var suffix = distance < 0 ? 'from now' : 'ago';
        var seconds = Math.abs(distance) / 1000;
        var minutes = seconds / 60;
        var hours = minutes / 60;
        var days = hours / 24;
        var years = days / 365;
        var phrase =
            seconds < 45 && 'less than a minute' ||
            seconds < 90 && 'about a minute' ||
            minutes < 45 && Math.round(minutes) + ' minutes' ||
            minutes < 90 && 'about an hour' ||
            hours < 24 && 'about ' + Math.round(hours) + ' hours' ||
            hours < 42 && 'a day' ||
            days < 30 && Math.round(days) + ' days' ||
            days < 45 && 'about a month' ||
            days < 365 && Math.round(days / 30) + ' months' ||
            years < 1.5 && 'about a year' ||
            Math.round(years) + ' years';
        return phrase + ' ' + suffix;
    }

    function cellText(row, index) {
        var cell = row.cells[index];
        return cell ? cell.textContent : '';
    }

    function headerCells(table) {
        return Array.prototype.slice.call(table.querySelectorAll('thead th[data-sort-index]'));
    }

    function attachSort(table) {
        var state = { column: null, direction: 'asc' };
        var headers = headerCells(table);
        headers.forEach(function (th) {
            th.addEventListener('click', function () {
                var index = Number(th.getAttribute('data-sort-index'));
                if (state.column === index) {
                    state.direction = state.direction === 'asc' ? 'desc' : 'asc';
                } else {
                    state.column = index;
                    state.direction = 'asc';
                }
                var body = table.tBodies[0];
                var keyed = Array.prototype.map.call(body.rows, function (row, position) {
                    return { row: row, key: cellText(row, index), position: position };
                });
                keyed.sort(function (a, b) {
                    var order = a.key < b.key ? -1 : (a.key > b.key ? 1 : 0);
                    if (state.direction === 'desc') {
                        order = -order;
                    }
                    return order || a.position - b.position;
                });
                keyed.forEach(function (entry) {
                    body.appendChild(entry.row);
                });
                headers.forEach(function (other) {
                    other.removeAttribute('aria-sort');
                });
                th.setAttribute('aria-sort', state.direction === 'asc' ? 'ascending' : 'descending');
            });
        });
    }

    function attachFilter(root, table) {
        var columns = {};
        headerCells(table).forEach(function (th) {
            columns[th.getAttribute('data-header')] = Number(th.getAttribute('data-sort-index'));
        });
        var inputs = Array.prototype.slice.call(root.querySelectorAll('input[data-filter-key]'));

        function apply() {
            var active = [];
            inputs.forEach(function (input) {
                var needle = input.value.toLowerCase();
                var index = columns[input.getAttribute('data-filter-key')];
                if (needle && index !== undefined) {
                    active.push({ index: index, needle: needle });
                }
            });
            Array.prototype.forEach.call(table.tBodies[0].rows, function (row) {
                row.hidden = !active.every(function (filter) {
                    return cellText(row, filter.index).toLowerCase().indexOf(filter.needle) !== -1;
                });
            });
        }

        inputs.forEach(function (input) {
            input.addEventListener('input', apply);
        });
    }

    function attachRelativeTime(root, now) {
        Array.prototype.forEach.call(root.querySelectorAll('time.timeago'), function (el) {
            var source = el.getAttribute('datetime');
            var then = new Date(source).getTime();
            if (isNaN(then)) {
                return;
            }
            if (!el.getAttribute('title')) {
                el.setAttribute('title', source);
            }
            el.textContent = relativeTime(then, now);
        });
    }

    function activate(root) {
        root = root || global.document;
        if (activated.has(root)) {
            return false;
        }
        activated.add(root);
        var table = root.querySelector('table.report-table');
        if (table && table.tBodies.length) {
            attachSort(table);
            attachFilter(root, table);
        }
        attachRelativeTime(root, Date.now());
        return true;
    }

    global.DbReport = { activate: activate, relativeTime: relativeTime };
    global.addEventListener('load', function () {
        activate(global.document);
    });
})(window);"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exposes_single_activation_entry_point() {
        assert!(ACTIVATION_SCRIPT.contains("global.DbReport = { activate: activate"));
        assert_eq!(ACTIVATION_SCRIPT.matches("addEventListener('load'").count(), 1);
    }

    #[test]
    fn script_cannot_close_its_own_tag() {
        assert!(!ACTIVATION_SCRIPT.contains("</script"));
    }
}
