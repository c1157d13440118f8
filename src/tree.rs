use crate::github::pulls::PullRequestInfo;
use std::collections::HashMap;

/// アリーナ内のノード位置
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

/// ルート（デフォルトブランチ）は常に先頭
pub const ROOT: NodeId = NodeId(0);

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum NodeKind {
    /// デフォルトブランチを表す合成ノード
    Root { title: String },
    /// PR を持たないベースブランチの合成ノード（attach 時のみ）
    Branch { label: String },
    Pull(PullRequestInfo),
}

#[derive(Debug, Clone)]
pub struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum TreeError {
    #[error(
        "PR #{number}: base branch `{base}` is neither the default branch nor the head of another pull request"
    )]
    UnknownBase { number: u64, base: String },
    #[error("PR #{number}: base branch `{label}` is the same as its head branch")]
    SelfReference { number: u64, label: String },
    #[error("PR #{number} is part of a cycle of base branches")]
    Cycle { number: u64 },
}

/// ベースブランチが PR にもデフォルトブランチにも一致しない場合の扱い
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UntrackedBase {
    #[default]
    Fail,
    Attach,
}

/// head ラベル → ベースの親子関係で組んだ PR のツリー
#[derive(Debug, Clone)]
pub struct PrTree {
    nodes: Vec<Node>,
}

impl PrTree {
    /// PR 一覧からツリーを組み立てる。
    ///
    /// 1. `default_label` をルートとして登録し、全 PR を head ラベルで登録（後勝ち）
    /// 2. 全て登録し終えてから各 PR の base ラベルで親を解決
    /// 3. ルートに到達しない PR（循環）を検出
    pub fn assemble(
        root_title: String,
        default_label: &str,
        pulls: Vec<PullRequestInfo>,
        untracked: UntrackedBase,
    ) -> Result<Self, TreeError> {
        let mut tree = Self {
            nodes: vec![Node {
                kind: NodeKind::Root { title: root_title },
                parent: None,
                children: Vec::new(),
            }],
        };

        let mut by_head: HashMap<String, NodeId> = HashMap::new();
        by_head.insert(default_label.to_string(), ROOT);

        let mut pending: Vec<(NodeId, u64, String)> = Vec::with_capacity(pulls.len());
        for pull in pulls {
            if pull.base_label == pull.head_label {
                return Err(TreeError::SelfReference {
                    number: pull.number,
                    label: pull.base_label,
                });
            }
            let number = pull.number;
            log::debug!("PR #{number} labels: {:?}", pull.labels);
            let head = pull.head_label.clone();
            let base = pull.base_label.clone();
            let id = tree.push(NodeKind::Pull(pull));
            if let Some(previous) = by_head.insert(head.clone(), id) {
                log::debug!("head `{head}` of PR #{number} replaces node {previous:?}");
            }
            pending.push((id, number, base));
        }

        let mut branches: HashMap<String, NodeId> = HashMap::new();
        for (id, number, base) in pending {
            let parent = match by_head.get(&base) {
                Some(&parent) => parent,
                None if untracked == UntrackedBase::Attach => match branches.get(&base) {
                    Some(&branch) => branch,
                    None => {
                        log::info!("attaching untracked base `{base}` to the root");
                        let branch = tree.push(NodeKind::Branch {
                            label: base.clone(),
                        });
                        tree.link(branch, ROOT);
                        branches.insert(base, branch);
                        branch
                    }
                },
                None => return Err(TreeError::UnknownBase { number, base }),
            };
            tree.link(id, parent);
        }

        tree.check_reachable()?;
        Ok(tree)
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    fn link(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// 全ノードの祖先チェーンがルートに到達するか確認する
    fn check_reachable(&self) -> Result<(), TreeError> {
        let mut reachable = vec![false; self.nodes.len()];
        reachable[ROOT.0] = true;

        for start in 0..self.nodes.len() {
            let mut path = Vec::new();
            let mut current = NodeId(start);
            while !reachable[current.0] {
                if path.contains(&current) {
                    return Err(TreeError::Cycle {
                        number: self.pull(current).map_or(0, |p| p.number),
                    });
                }
                path.push(current);
                match self.nodes[current.0].parent() {
                    Some(parent) => current = parent,
                    None => {
                        return Err(TreeError::Cycle {
                            number: self.pull(current).map_or(0, |p| p.number),
                        });
                    }
                }
            }
            for id in path {
                reachable[id.0] = true;
            }
        }
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes[id.0].children()
    }

    pub fn pull(&self, id: NodeId) -> Option<&PullRequestInfo> {
        match &self.nodes[id.0].kind {
            NodeKind::Pull(pull) => Some(pull),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
